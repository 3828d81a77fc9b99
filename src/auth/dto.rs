use serde::Deserialize;

/// Registration form fields.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub name: String,
    pub password: String,
}

/// Flash message passed back to a form page via the query string.
#[derive(Debug, Default, Deserialize)]
pub struct FlashParams {
    pub error: Option<String>,
    pub notice: Option<String>,
}
