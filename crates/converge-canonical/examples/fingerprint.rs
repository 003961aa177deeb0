use converge_canonical::{canonicalize_document, generate_hash, to_compact_string};
use serde_json::json;

fn main() {
    let resource = json!({
        "apiVersion": "v1",
        "kind": "Secret",
        "type": "Opaque",
        "metadata": {"name": "db-credentials", "namespace": "prod"},
        "data": {"username": "YWRtaW4=", "password": "c2VjcmV0"}
    });
    let Some(resource) = resource.as_object() else {
        eprintln!("resource is not a mapping");
        std::process::exit(1);
    };

    match to_compact_string(&canonicalize_document(resource)) {
        Ok(canonical) => println!("{}", canonical),
        Err(err) => {
            eprintln!("encoding failed: {}", err);
            std::process::exit(1);
        }
    }

    match generate_hash(resource) {
        Ok(fingerprint) => println!("db-credentials-{}", fingerprint),
        Err(err) => {
            eprintln!("fingerprint failed: {}", err);
            std::process::exit(1);
        }
    }
}
