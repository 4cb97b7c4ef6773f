use secrecy::{ExposeSecret, SecretString};

const MIN_LENGTH: usize = 8;
const MAX_LENGTH: usize = 128;

/// A password whose confirmation matched and whose length is within bounds.
#[derive(Debug)]
pub struct PasswordPair(SecretString);

impl PasswordPair {
    pub fn parse(password: SecretString, confirm_password: SecretString) -> Result<PasswordPair, String> {
        if password.expose_secret() != confirm_password.expose_secret() {
            return Err("the password and confirm passwords don't match".to_string());
        }

        let length = password.expose_secret().chars().count();
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
            return Err(format!(
                "password must be between {} and {} characters long",
                MIN_LENGTH, MAX_LENGTH
            ));
        }

        Ok(Self(password))
    }

    pub fn into_secret(self) -> SecretString {
        self.0
    }
}
