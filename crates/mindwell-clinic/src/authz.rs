use tracing::warn;

use mindwell_core::principal::{Capability, Principal};

use crate::error::ClinicError;

/// Gate an operation on a capability of the calling principal.
pub fn authorize(principal: &Principal, capability: Capability) -> Result<(), ClinicError> {
    if principal.can(capability) {
        Ok(())
    } else {
        warn!(
            user_id = principal.user_id,
            role = %principal.role,
            ?capability,
            "capability denied"
        );
        Err(ClinicError::Forbidden("insufficient permissions".to_string()))
    }
}
