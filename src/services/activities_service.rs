use indexmap::IndexMap;
use tracing::{info, warn};

use crate::database::{ActivityRegistry, Registration};
use crate::error::RegistryError;
use crate::models::{Activity, MessageResponse};

pub fn list_activities(registry: &ActivityRegistry) -> IndexMap<String, Activity> {
    registry.list_activities()
}

pub fn load_activity(registry: &ActivityRegistry, name: &str) -> Result<Activity, RegistryError> {
    registry.get_activity(name)
}

pub fn signup(
    registry: &ActivityRegistry,
    activity_name: &str,
    email: &str,
) -> Result<MessageResponse, RegistryError> {
    match registry.signup(activity_name, email) {
        Ok(reg) => {
            info!(activity = %reg.activity, email = %reg.email, "signup_ok");
            Ok(MessageResponse {
                message: signup_message(&reg),
            })
        }
        Err(e) => {
            warn!(activity = %e.activity(), email = %email, kind = e.kind(), "signup_rejected");
            Err(e)
        }
    }
}

pub fn unregister(
    registry: &ActivityRegistry,
    activity_name: &str,
    email: &str,
) -> Result<MessageResponse, RegistryError> {
    match registry.unregister(activity_name, email) {
        Ok(reg) => {
            info!(activity = %reg.activity, email = %reg.email, "unregister_ok");
            Ok(MessageResponse {
                message: unregister_message(&reg),
            })
        }
        Err(e) => {
            warn!(activity = %e.activity(), email = %email, kind = e.kind(), "unregister_rejected");
            Err(e)
        }
    }
}

fn signup_message(reg: &Registration) -> String {
    format!("Signed up {} for {}", reg.email, reg.activity)
}

fn unregister_message(reg: &Registration) -> String {
    format!("Unregistered {} from {}", reg.email, reg.activity)
}
