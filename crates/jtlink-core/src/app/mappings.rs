use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt;
use std::sync::Arc;

use crate::domain::MsgType;
use crate::ports::MsgHandler;

/// Read-only snapshot of a registry's msg_type -> handler associations.
///
/// Owns its own copy of the entries: registrations made after the snapshot
/// was taken are not visible, and there is no way to write back into the
/// registry through it.
#[derive(Clone, Default)]
pub struct HandlerMappings {
    entries: HashMap<MsgType, Arc<dyn MsgHandler>>,
}

impl HandlerMappings {
    pub fn get(&self, msg_type: MsgType) -> Option<&Arc<dyn MsgHandler>> {
        self.entries.get(&msg_type)
    }

    pub fn contains(&self, msg_type: MsgType) -> bool {
        self.entries.contains_key(&msg_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Registered msg types in ascending order.
    pub fn msg_types(&self) -> Vec<MsgType> {
        let mut msg_types: Vec<MsgType> = self.entries.keys().copied().collect();
        msg_types.sort_unstable();
        msg_types
    }
}

impl FromIterator<(MsgType, Arc<dyn MsgHandler>)> for HandlerMappings {
    fn from_iter<I: IntoIterator<Item = (MsgType, Arc<dyn MsgHandler>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for HandlerMappings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(msg_type, handler)| (msg_type, handler.name())))
            .finish()
    }
}

/// Iterator over `(MsgType, &handler)` pairs, in no particular order.
pub struct Iter<'a> {
    inner: hash_map::Iter<'a, MsgType, Arc<dyn MsgHandler>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (MsgType, &'a Arc<dyn MsgHandler>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(msg_type, handler)| (*msg_type, handler))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a HandlerMappings {
    type Item = (MsgType, &'a Arc<dyn MsgHandler>);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::FnHandler;

    #[test]
    fn iterates_all_entries() {
        let location: Arc<dyn MsgHandler> =
            Arc::new(FnHandler::noop("location", [MsgType::LOCATION_UPLOAD]));
        let mappings: HandlerMappings = [
            (MsgType::LOCATION_UPLOAD, Arc::clone(&location)),
            (MsgType::BATCH_LOCATION_UPLOAD, Arc::clone(&location)),
        ]
        .into_iter()
        .collect();

        let mut names: Vec<(MsgType, &str)> = mappings
            .iter()
            .map(|(msg_type, handler)| (msg_type, handler.name()))
            .collect();
        names.sort();

        assert_eq!(
            names,
            vec![
                (MsgType::LOCATION_UPLOAD, "location"),
                (MsgType::BATCH_LOCATION_UPLOAD, "location"),
            ]
        );
        assert_eq!((&mappings).into_iter().count(), 2);
    }

    #[test]
    fn debug_prints_handler_names() {
        let mappings: HandlerMappings = [(
            MsgType::HEARTBEAT,
            Arc::new(FnHandler::noop("heartbeat", [MsgType::HEARTBEAT])) as Arc<dyn MsgHandler>,
        )]
        .into_iter()
        .collect();

        assert_eq!(format!("{mappings:?}"), "{MsgType(2): \"heartbeat\"}");
    }
}
