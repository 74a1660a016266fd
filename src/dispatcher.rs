//! Routes decoded data frames to the handlers registered for their service,
//! rewriting numeric field codes to symbolic names along the way.

use std::collections::HashMap;

use crate::codec::DataEntry;
use crate::errors::Error;
use crate::fields::{self, ServiceId};

/// A user-supplied callback invoked with a data entry whose content has
/// already been field-renamed for its service.
pub type HandlerFn = Box<dyn FnMut(&DataEntry) -> Result<(), Error> + Send>;

#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<ServiceId, Vec<HandlerFn>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `handler` to `service`'s ordered list.
    pub fn register(&mut self, service: ServiceId, handler: HandlerFn) {
        self.handlers.entry(service).or_default().push(handler);
    }

    /// Rewrites every coded key in `entry`'s content to its symbolic name,
    /// then invokes every handler registered for its service, in
    /// registration order. A handler's failure does not stop the rest from
    /// running; failures are aggregated into one [`Error::Handler`].
    pub fn deliver(&mut self, mut entry: DataEntry) -> Result<(), Error> {
        let service = ServiceId::from_wire_name(&entry.service)
            .ok_or_else(|| Error::UnexpectedResponse(format!("unknown service: {}", entry.service)))?;

        for item in entry.content.iter_mut() {
            rename_fields(service, item);
        }

        let mut failures = Vec::new();
        if let Some(handlers) = self.handlers.get_mut(&service) {
            for handler in handlers.iter_mut() {
                if let Err(e) = handler(&entry) {
                    failures.push(e.to_string());
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Handler(failures.join("; ")))
        }
    }
}

fn rename_fields(service: ServiceId, item: &mut serde_json::Map<String, serde_json::Value>) {
    let renames: Vec<(String, String)> = item
        .keys()
        .filter_map(|k| {
            k.parse::<u32>()
                .ok()
                .and_then(|code| fields::symbolic(service, code))
                .map(|name| (k.clone(), name.to_string()))
        })
        .collect();
    for (old, new) in renames {
        if let Some(value) = item.remove(&old) {
            item.insert(new, value);
        }
    }
}
