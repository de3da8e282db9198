//! User role enumeration.

define_enum! {
    /// Role assigned to a user account.
    UserRole, pg = "user_role", default = Cliente {
        /// Firm administrator.
        Admin => "admin",
        /// Lawyer handling cases.
        Abogado => "abogado",
        /// Paralegal or office assistant.
        Asistente => "asistente",
        /// Client of the firm.
        Cliente => "cliente",
    }
}

impl UserRole {
    /// Check if this role is the administrator role.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Check if this role belongs to firm staff rather than a client.
    pub fn is_staff(&self) -> bool {
        !matches!(self, Self::Cliente)
    }
}
