//! NVS (Non-Volatile Storage) adapter.
//!
//! Implements [`ConfigPort`] for the FeedMinder system. The configuration
//! is stored as a single postcard blob under the `feedminder` namespace.
//! Only the configuration persists; reminder state does not survive power
//! loss (the operator feeds at power-on instead).
//!
//! Config validation: fields are range-checked before persistence and after
//! loading, so the controller never sees an invalid interval.

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::FeedConfig;

#[cfg(not(target_os = "espidf"))]
use std::cell::RefCell;
#[cfg(not(target_os = "espidf"))]
use std::collections::HashMap;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::warn;

#[cfg(target_os = "espidf")]
const CONFIG_NAMESPACE: &core::ffi::CStr = c"feedminder";
#[cfg(target_os = "espidf")]
const CONFIG_KEY: &core::ffi::CStr = c"feedcfg";

/// Upper bound on the stored blob; anything larger is treated as corrupt.
const MAX_BLOB_SIZE: usize = 256;

pub struct NvsAdapter {
    #[cfg(not(target_os = "espidf"))]
    store: RefCell<HashMap<String, Vec<u8>>>,
}

impl NvsAdapter {
    /// Create a new NvsAdapter and initialise NVS flash.
    ///
    /// Returns `Err(ConfigError::IoError)` if flash initialisation fails
    /// unrecoverably. On first boot or after a version mismatch the NVS
    /// partition is erased and re-initialised automatically.
    pub fn new() -> Result<Self, ConfigError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: nvs_flash_init / nvs_flash_erase are called from the
            // single main-task context before any other NVS access.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
                warn!("NVS: erasing and re-initialising flash partition");
                if unsafe { nvs_flash_erase() } != ESP_OK {
                    return Err(ConfigError::IoError);
                }
                if unsafe { nvs_flash_init() } != ESP_OK {
                    return Err(ConfigError::IoError);
                }
            } else if ret != ESP_OK {
                return Err(ConfigError::IoError);
            }
            Ok(Self {})
        }

        #[cfg(not(target_os = "espidf"))]
        {
            Ok(Self {
                store: RefCell::new(HashMap::new()),
            })
        }
    }

    // ── ESP-IDF backend ───────────────────────────────────────

    /// Open the config namespace, run `f`, and close the handle.
    #[cfg(target_os = "espidf")]
    fn with_handle<T>(
        write: bool,
        f: impl FnOnce(nvs_handle_t) -> Result<T, ConfigError>,
    ) -> Result<T, ConfigError> {
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };
        let mut handle: nvs_handle_t = 0;
        // SAFETY: namespace is a valid NUL-terminated string; handle is
        // closed before this function returns.
        let ret = unsafe { nvs_open(CONFIG_NAMESPACE.as_ptr(), mode, &mut handle) };
        if ret == ESP_ERR_NVS_NOT_FOUND {
            // Read-only open of a namespace that was never written.
            return Err(ConfigError::NotFound);
        }
        if ret != ESP_OK {
            return Err(ConfigError::IoError);
        }
        let out = f(handle);
        unsafe { nvs_close(handle) };
        out
    }
}

impl ConfigPort for NvsAdapter {
    fn load(&self) -> Result<FeedConfig, ConfigError> {
        #[cfg(target_os = "espidf")]
        {
            Self::with_handle(false, |handle| {
                // First call sizes the blob, second call fetches it.
                let mut len: usize = 0;
                let ret = unsafe {
                    nvs_get_blob(handle, CONFIG_KEY.as_ptr(), core::ptr::null_mut(), &mut len)
                };
                if ret == ESP_ERR_NVS_NOT_FOUND {
                    return Err(ConfigError::NotFound);
                }
                if ret != ESP_OK {
                    return Err(ConfigError::IoError);
                }
                if len == 0 || len > MAX_BLOB_SIZE {
                    return Err(ConfigError::Corrupted);
                }

                let mut buf = vec![0u8; len];
                // SAFETY: buf has exactly `len` bytes as reported by the
                // sizing call above.
                let ret = unsafe {
                    nvs_get_blob(
                        handle,
                        CONFIG_KEY.as_ptr(),
                        buf.as_mut_ptr().cast(),
                        &mut len,
                    )
                };
                if ret != ESP_OK {
                    return Err(ConfigError::IoError);
                }

                decode_and_validate(&buf[..len])
            })
        }

        #[cfg(not(target_os = "espidf"))]
        {
            let store = self.store.borrow();
            let bytes = store
                .get(&sim_key())
                .ok_or(ConfigError::NotFound)?;
            if bytes.len() > MAX_BLOB_SIZE {
                return Err(ConfigError::Corrupted);
            }
            decode_and_validate(bytes)
        }
    }

    fn save(&self, config: &FeedConfig) -> Result<(), ConfigError> {
        config.validate().map_err(ConfigError::ValidationFailed)?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;

        #[cfg(target_os = "espidf")]
        {
            Self::with_handle(true, |handle| {
                // SAFETY: bytes outlives the call; length matches the slice.
                let ret = unsafe {
                    nvs_set_blob(handle, CONFIG_KEY.as_ptr(), bytes.as_ptr().cast(), bytes.len())
                };
                if ret != ESP_OK {
                    return Err(ConfigError::IoError);
                }
                if unsafe { nvs_commit(handle) } != ESP_OK {
                    return Err(ConfigError::IoError);
                }
                Ok(())
            })
        }

        #[cfg(not(target_os = "espidf"))]
        {
            self.store.borrow_mut().insert(sim_key(), bytes);
            Ok(())
        }
    }
}

fn decode_and_validate(bytes: &[u8]) -> Result<FeedConfig, ConfigError> {
    let config: FeedConfig = postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)?;
    config.validate().map_err(ConfigError::ValidationFailed)?;
    Ok(config)
}

#[cfg(not(target_os = "espidf"))]
fn sim_key() -> String {
    "feedminder::feedcfg".to_string()
}
