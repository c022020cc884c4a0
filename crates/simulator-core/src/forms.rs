//! Auth and Onboarding Forms
//!
//! Client-side validation for login, registration and character creation,
//! plus the built-in avatar catalogue.

use crate::error::ValidationError;
use crate::models::{CharacterRequest, Credentials};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, ValidationError> {
        require("username", &self.username)?;
        require("password", &self.password)?;
        Ok(Credentials { username: self.username.trim().to_string(), password: self.password.clone() })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub password_confirmation: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<Credentials, ValidationError> {
        require("username", &self.username)?;
        require("password", &self.password)?;
        require("password_confirmation", &self.password_confirmation)?;
        if self.password != self.password_confirmation {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(Credentials { username: self.username.trim().to_string(), password: self.password.clone() })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sex::Male => "М",
            Sex::Female => "Ж",
        }
    }
}

const MALE_AVATARS: &[&str] = &[
    "man1", "man2", "man3", "man4", "man5", "man6", "man7", "man8", "man9", "man10",
];
const FEMALE_AVATARS: &[&str] = &[
    "woman1", "woman2", "woman3", "woman4", "woman5", "woman6", "woman7", "woman8", "woman9", "woman10",
];

/// Avatar keys offered for a sex
pub fn avatars(sex: Sex) -> &'static [&'static str] {
    match sex {
        Sex::Male => MALE_AVATARS,
        Sex::Female => FEMALE_AVATARS,
    }
}

/// Image URL for an avatar key; absolute URLs pass through
pub fn avatar_src(avatar: &str) -> String {
    if avatar.starts_with("http://") || avatar.starts_with("https://") {
        avatar.to_string()
    } else {
        format!("/avatars/{}.png", avatar)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterForm {
    pub first_name: String,
    pub last_name: String,
    pub sex: Sex,
    pub avatar: Option<String>,
}

impl CharacterForm {
    /// Switching sex drops an avatar that belongs to the other set
    pub fn set_sex(&mut self, sex: Sex) {
        self.sex = sex;
        if self.avatar.as_deref().is_some_and(|a| !avatars(sex).contains(&a)) {
            self.avatar = None;
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<CharacterRequest, ValidationError> {
        require("first_name", &self.first_name)?;
        require("last_name", &self.last_name)?;
        let avatar = self.avatar.clone().ok_or(ValidationError::MissingField("avatar"))?;
        Ok(CharacterRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            sex: self.sex.as_str().to_string(),
            avatar,
        })
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_password_mismatch() {
        let form = RegisterForm {
            username: "me@example.com".into(),
            password: "secret1".into(),
            password_confirmation: "secret2".into(),
        };
        assert_eq!(form.validate(), Err(ValidationError::PasswordMismatch));

        let form = RegisterForm { password_confirmation: "secret1".into(), ..form };
        assert_eq!(form.validate().unwrap().username, "me@example.com");
    }

    #[test]
    fn test_register_requires_all_fields() {
        let form = RegisterForm { username: " ".into(), ..Default::default() };
        assert_eq!(form.validate(), Err(ValidationError::MissingField("username")));
    }

    #[test]
    fn test_character_form() {
        let mut form = CharacterForm {
            first_name: " Anna ".into(),
            last_name: "Petrova".into(),
            sex: Sex::Female,
            avatar: None,
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingField("avatar")));

        form.avatar = Some("woman3".into());
        let request = form.validate().unwrap();
        assert_eq!(request.first_name, "Anna");
        assert_eq!(request.sex, "female");

        form.set_sex(Sex::Male);
        assert_eq!(form.avatar, None);
        assert!(!form.is_valid());
    }

    #[test]
    fn test_avatar_src() {
        assert_eq!(avatar_src("man2"), "/avatars/man2.png");
        assert_eq!(avatar_src("https://cdn.example/a.png"), "https://cdn.example/a.png");
        assert_eq!(avatars(Sex::Female).len(), 10);
    }
}
