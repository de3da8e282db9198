//! Access rules for a single document.
//!
//! Read access: the document is public or the user holds any permission row.
//! Write access: `escritura` or `administrador`. Admin: `administrador` only.

use uuid::Uuid;

use doctajus_core::error::AppError;
use doctajus_core::result::AppResult;
use doctajus_entity::documento::{Documento, DocumentoPermiso, TipoPermiso};

/// Level of access an operation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceso {
    Lectura,
    Escritura,
    Administracion,
}

/// Whether a user with `permiso` on `documento` may perform an operation
/// needing `acceso`.
pub fn permite(acceso: Acceso, documento: &Documento, permiso: Option<&DocumentoPermiso>) -> bool {
    match acceso {
        Acceso::Lectura => documento.es_publico || permiso.is_some(),
        Acceso::Escritura => permiso.is_some_and(|p| p.tipo_permiso.can_write()),
        Acceso::Administracion => permiso.is_some_and(|p| p.tipo_permiso.is_admin()),
    }
}

/// The creator always keeps `administrador` on their own document.
pub fn validar_permiso_otorgado(
    documento: &Documento,
    usuario_id: Uuid,
    tipo_permiso: TipoPermiso,
) -> AppResult<()> {
    if documento.is_owner(usuario_id) && !tipo_permiso.is_admin() {
        return Err(AppError::validation(
            "No se puede modificar el permiso del propietario del documento",
        ));
    }
    Ok(())
}
