use serde::Deserialize;

use super::{non_empty, FieldErrors, Validate};
use crate::database::models::NewGolfClub;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GolfClubInput {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state_code: String,
    pub zip_code: String,
    pub phone_number: String,
    #[serde(default)]
    pub email: String,
}

impl Validate for GolfClubInput {
    fn validate(&self, errors: &mut FieldErrors) {
        non_empty(errors, "name", &self.name);
        non_empty(errors, "address", &self.address);
        non_empty(errors, "city", &self.city);
        errors.check(
            self.state_code.len() == 2 && self.state_code.chars().all(|c| c.is_ascii_alphabetic()),
            "state_code",
            "must be a two-letter state code",
        );
        non_empty(errors, "zip_code", &self.zip_code);
        errors.check(
            self.email.is_empty() || self.email.contains('@'),
            "email",
            "must be an email address",
        );
    }
}

impl GolfClubInput {
    pub fn into_new(self) -> NewGolfClub {
        NewGolfClub {
            name: self.name,
            address: self.address,
            city: self.city,
            state_code: self.state_code.to_ascii_uppercase(),
            zip_code: self.zip_code,
            phone_number: self.phone_number,
            email: self.email,
        }
    }
}
