// src/services/auth.rs

use bcrypt::verify;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::{common::error::AppError, models::auth::Claims};

const ADMIN_SUBJECT: &str = "admin";
const TOKEN_TTL_DAYS: i64 = 7;

/// Login da equipe: um único passcode (hash bcrypt vindo da configuração).
#[derive(Clone)]
pub struct AuthService {
    password_hash: String,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(password_hash: String, jwt_secret: String) -> Self {
        Self {
            password_hash,
            jwt_secret,
        }
    }

    pub async fn login(&self, password: &str) -> Result<String, AppError> {
        let password_clone = password.to_owned();
        let password_hash_clone = self.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            tracing::warn!("Tentativa de login com senha inválida");
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!("🔑 Login administrativo");
        self.create_token()
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        if token_data.claims.sub != ADMIN_SUBJECT {
            return Err(AppError::InvalidToken);
        }
        Ok(token_data.claims)
    }

    fn create_token(&self) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(TOKEN_TTL_DAYS);

        let claims = Claims {
            sub: ADMIN_SUBJECT.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
