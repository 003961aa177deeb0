//! Name command implementation.

use crate::input;
use converge_core::{hashed_name, ResourceError, ResourceId};

pub fn run(input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let document = input::read_document(input.as_deref())?;
    let id = ResourceId::from_document(&document)?;

    let name = hashed_name(&document)
        .map_err(|e| ResourceError::new(&id.kind, &id.name, e.to_string()))?;
    match name {
        Some(name) => println!("{}", name),
        None => {
            tracing::debug!(kind = %id.kind, "kind has no fingerprint, keeping name");
            println!("{}", id.name);
        }
    }
    Ok(())
}
