use std::sync::Arc;

use orgreg_application::{IdentityLookup, TokenCodec};
use orgreg_core::AppError;
use orgreg_infrastructure::{HttpIdentityLookup, RsaTokenCodec};

use crate::api_config::ApiConfig;

pub(super) fn build_token_codec(config: &ApiConfig) -> Result<Arc<dyn TokenCodec>, AppError> {
    Ok(Arc::new(RsaTokenCodec::from_base64_public_key(
        &config.jwt_public_key,
    )?))
}

pub(super) fn build_identity_lookup(
    config: &ApiConfig,
) -> Result<Arc<dyn IdentityLookup>, AppError> {
    Ok(Arc::new(HttpIdentityLookup::new(
        &config.auth_api_url,
        config.auth_api_timeout,
    )?))
}
