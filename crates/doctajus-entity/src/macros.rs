//! Declarative helper for string-backed domain enums.

/// Defines a fieldless enum stored as a PostgreSQL enum type and
/// serialized as its lowercase wire name.
///
/// Generates `as_str`, `ALL`, `Display`, `Default`, and a `FromStr`
/// that returns a validation error listing the accepted values.
macro_rules! define_enum {
    (
        $(#[$meta:meta])*
        $name:ident, pg = $pg:tt, default = $default:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:tt
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize, sqlx::Type,
        )]
        #[sqlx(type_name = $pg)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                #[sqlx(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            /// Return the wire name of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = doctajus_core::AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($wire => Ok(Self::$variant),)+
                    _ => {
                        let expected: Vec<&str> = Self::ALL.iter().map(|v| v.as_str()).collect();
                        Err(doctajus_core::AppError::validation(format!(
                            "Invalid {}: '{s}'. Expected one of: {}",
                            stringify!($name),
                            expected.join(", ")
                        )))
                    }
                }
            }
        }
    };
}
