use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use mongodb::bson::oid::ObjectId;

use crate::utils::{errors::ApiError, security::AuthUtils};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserRole {
    Tutor,
    #[serde(rename = "Cuidador")]
    Caregiver,
    Admin
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountStatus {
    #[serde(rename = "Pendente")]
    Pending,
    #[serde(rename = "Ativo")]
    Active,
    #[serde(rename = "Bloqueado")]
    Blocked
}

impl UserRole {
    /// Caregivers wait for an admin before they can work.
    pub fn initial_status(&self) -> AccountStatus {
        match self {
            UserRole::Caregiver => AccountStatus::Pending,
            _ => AccountStatus::Active,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "usuario")]
    pub handle: String,
    #[serde(rename = "senha")]
    pub password: String,
    #[serde(rename = "endereco", default)]
    pub address: String,
    #[serde(rename = "tipo")]
    pub role: UserRole,
    #[serde(default = "default_status")]
    pub status: AccountStatus,
    #[serde(rename = "diaria", default, skip_serializing_if = "Option::is_none")]
    pub day_rate: Option<f64>,
    #[serde(default)]
    pub bio: String,
    #[serde(rename = "especies", default)]
    pub species: Vec<String>,
    #[serde(rename = "portes", default)]
    pub sizes: Vec<String>,
    #[serde(rename = "dt", default = "Utc::now", with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

// Older records were written without a status and count as active.
fn default_status() -> AccountStatus {
    AccountStatus::Active
}

/// Normalised form under which handles are stored and looked up.
pub fn normalize_handle(handle: &str) -> String {
    handle.trim().to_lowercase()
}

impl User {
    pub fn new(register: UserRegisterReceive, password_hash: String) -> Self {
        User {
            id: None,
            name: register.name.trim().to_string(),
            handle: normalize_handle(&register.handle),
            password: password_hash,
            address: register.address.trim().to_string(),
            role: register.role,
            status: register.role.initial_status(),
            day_rate: register.day_rate,
            bio: register.bio.unwrap_or_default(),
            species: register.species.unwrap_or_default(),
            sizes: register.sizes.unwrap_or_default(),
            created_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// Pending caregivers may browse but not act.
    pub fn require_active(&self) -> Result<(), ApiError> {
        match self.status {
            AccountStatus::Active => Ok(()),
            AccountStatus::Pending => Err(ApiError::Forbidden("Account is awaiting admin approval".to_string())),
            AccountStatus::Blocked => Err(ApiError::Forbidden("Account is blocked".to_string())),
        }
    }

    /// Credential check against the stored hash. Records that predate hashing
    /// hold something bcrypt cannot parse and never match.
    pub fn check_password(&self, candidate: &str) -> bool {
        match AuthUtils::verify_password(candidate, &self.password) {
            Ok(matches) => matches,
            Err(e) => {
                log::warn!("Stored password for '{}' is not a bcrypt hash: {}", self.handle, e);
                false
            }
        }
    }

    pub fn accepts_species(&self, species: &str) -> bool {
        let wanted = species.trim().to_lowercase();
        self.species.iter().any(|accepted| accepted.trim().to_lowercase() == wanted)
    }

    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            handle: self.handle.clone(),
            address: self.address.clone(),
            role: self.role,
            status: self.status,
            day_rate: self.day_rate,
            bio: self.bio.clone(),
            species: self.species.clone(),
            sizes: self.sizes.clone(),
        }
    }

    pub fn apply_update(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(address) = update.address {
            self.address = address.trim().to_string();
        }
        if let Some(bio) = update.bio {
            self.bio = bio;
        }
        if update.day_rate.is_some() {
            self.day_rate = update.day_rate;
        }
        if let Some(species) = update.species {
            self.species = species;
        }
        if let Some(sizes) = update.sizes {
            self.sizes = sizes;
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserRegisterReceive {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "usuario")]
    pub handle: String,
    #[serde(rename = "senha")]
    pub password: String,
    #[serde(rename = "endereco", default)]
    pub address: String,
    #[serde(rename = "tipo")]
    pub role: UserRole,
    #[serde(rename = "diaria", default)]
    pub day_rate: Option<f64>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(rename = "especies", default)]
    pub species: Option<Vec<String>>,
    #[serde(rename = "portes", default)]
    pub sizes: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserLoginReceive {
    #[serde(rename = "usuario")]
    pub handle: String,
    #[serde(rename = "senha")]
    pub password: String,
}

/// What leaves the service about a user. Never carries the password.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "usuario")]
    pub handle: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "tipo")]
    pub role: UserRole,
    pub status: AccountStatus,
    #[serde(rename = "diaria", skip_serializing_if = "Option::is_none")]
    pub day_rate: Option<f64>,
    pub bio: String,
    #[serde(rename = "especies")]
    pub species: Vec<String>,
    #[serde(rename = "portes")]
    pub sizes: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ProfileUpdate {
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
    #[serde(rename = "endereco", default)]
    pub address: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(rename = "diaria", default)]
    pub day_rate: Option<f64>,
    #[serde(rename = "especies", default)]
    pub species: Option<Vec<String>>,
    #[serde(rename = "portes", default)]
    pub sizes: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserProfile,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StatusUpdate {
    pub status: AccountStatus,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CaregiverQuery {
    #[serde(rename = "especie")]
    pub species: Option<String>,
}
