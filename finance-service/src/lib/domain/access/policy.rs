use crate::domain::access::errors::AccessError;
use crate::domain::access::models::AuthenticatedIdentity;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;

/// Allow only the owner of a resource.
///
/// `resource_owner` is the raw identifier taken from the request path; it is
/// parsed before comparison so formatting differences of the same id match.
///
/// # Errors
/// * `Unauthenticated` - No identity attached
/// * `NotOwner` - Identity id differs from the resource owner
pub fn ensure_owner(
    identity: Option<&AuthenticatedIdentity>,
    resource_owner: &str,
) -> Result<(), AccessError> {
    let identity = identity.ok_or(AccessError::Unauthenticated)?;

    match UserId::from_string(resource_owner) {
        Ok(owner) if owner == identity.id => Ok(()),
        _ => Err(AccessError::NotOwner {
            resource_owner: resource_owner.to_string(),
        }),
    }
}

/// Allow only callers holding `required`.
///
/// # Errors
/// * `Unauthenticated` - No identity attached
/// * `MissingRole` - Identity has a different role
pub fn ensure_role(
    identity: Option<&AuthenticatedIdentity>,
    required: Role,
) -> Result<(), AccessError> {
    let identity = identity.ok_or(AccessError::Unauthenticated)?;

    if identity.role == required {
        Ok(())
    } else {
        Err(AccessError::MissingRole { required })
    }
}
