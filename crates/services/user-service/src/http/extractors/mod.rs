//! Request extractors that validate before the handler runs.

mod profile_form;
mod validated_json;

pub use profile_form::{ProfileForm, ProfileFormDoc};
pub use validated_json::ValidatedJson;
