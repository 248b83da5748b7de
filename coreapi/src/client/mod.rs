//! Executing bound requests.
//!
//! [`CoreClient`] ties the pieces together: bind the request record, sign
//! it, hand it to an [`HttpExecutor`], and bind the response. The executor
//! and signer are traits so tests and embedders can swap the transport or
//! the credential scheme.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use coreapi::{CallOptions, ClientConfig, CoreClient, Record};
//!
//! let registry = coreapi_definitions::core_services()?;
//! let client = CoreClient::from_config(registry, ClientConfig::from_env()?)?;
//!
//! let request = Record::new("GetVolumeRequest").with("volumeId", "ocid1.volume.oc1..x");
//! let response = client
//!     .call_by_id("GetVolume", &request.into(), CallOptions::default())
//!     .await?;
//! println!("etag: {:?}", response.etag());
//! ```

mod cancel;
mod core_client;
mod executor;
mod signer;

pub use cancel::{cancel_pair, CancelHandle, CancelToken};
pub use core_client::{CallOptions, CoreClient};
pub use executor::{HttpExecutor, ReqwestExecutor};
pub use signer::{HeaderSigner, NoSigner, RequestSigner};
