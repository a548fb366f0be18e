//! These models represent the objects passed through the adapter
//!
//! There are three formats we need to interact with:
//! - the provider-agnostic creation request, sent from callers to the adapter
//! - vapi and retell request/reply bodies, exchanged with the upstream platforms
//! - the normalized envelope, returned from the adapter to callers
//!
//! Inbound payloads are validated and converted into the typed structs here as soon as
//! they arrive. Provider-specific wire types live with their providers.
pub mod params;
pub mod request;
pub mod response;
