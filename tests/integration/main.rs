//! Router-level integration tests.
//!
//! Tests in this binary drive the Axum router in-process. Most run
//! without PostgreSQL: the pool connects lazily and the paths under test
//! (auth guard, validation, static uploads, health) never reach it. The
//! end-to-end scenarios need a database and are `#[ignore]`d;
//! run them with `DOCTAJUS_TEST_DATABASE_URL` set and
//! `-- --ignored --test-threads=1`, since each one empties the database.

mod helpers;

mod auth_test;
mod documento_test;
mod expediente_test;
mod health_test;
mod uploads_test;
mod user_test;
