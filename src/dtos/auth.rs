//! Auth DTOs - Data Transfer Objects para autenticación

use crate::entities::User;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    // los admins no se registran por el formulario
    static ref RE_ROLE: Regex = Regex::new("^(organizer|provider)$").unwrap();
}

/// DTO de registro; el rol se valida contra la lista blanca antes de
/// reenviar nada al backend.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct SignupDTO {
    #[validate(length(min = 1, message = "El nombre es obligatorio"))]
    pub name: String,

    #[validate(email(message = "El email no es válido"))]
    pub email: String,

    #[validate(length(min = 1, message = "La contraseña es obligatoria"))]
    pub password: String,

    #[validate(regex(path = *RE_ROLE, message = "El rol debe ser organizer o provider"))]
    pub role: String,
}

/// Cuerpo que el backend devuelve al autenticar: token portador y,
/// opcionalmente, el usuario.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SessionDTO {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}
