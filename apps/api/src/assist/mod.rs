//! AI assist: the public chat widget and the admin field-suggestion
//! endpoint. Both are thin stateless wrappers over the LLM client; chat
//! additionally carries the always-succeed fallback contract.

pub mod fallback;
pub mod handlers;
pub mod prompts;
pub mod snapshot;
pub mod suggest;
