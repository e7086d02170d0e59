use pinboard_model::{
    Message, SPECIAL_OFFER_CACHE_KEY, SessionCache, TRANSCRIPT_CACHE_KEY,
};

use crate::conversation::Transcript;

/// Reads and writes engine state through the session cache.
///
/// Every failure is logged and swallowed: a failed read is treated as a
/// miss and a failed write is skipped.
pub(crate) struct Persistence {
    cache: Option<Box<dyn SessionCache>>,
}

impl Persistence {
    #[inline]
    pub fn new(cache: Option<Box<dyn SessionCache>>) -> Self {
        Self { cache }
    }

    /// Loads a previously saved transcript, if it exists and is usable.
    pub fn load_transcript(&self) -> Option<Transcript> {
        let raw = self.read(TRANSCRIPT_CACHE_KEY)?;
        let messages: Vec<Message> = match serde_json::from_str(&raw) {
            Ok(messages) => messages,
            Err(err) => {
                warn!("discarding malformed cached transcript: {err}");
                return None;
            }
        };
        if messages.is_empty() {
            debug!("cached transcript is empty, ignoring it");
            return None;
        }
        let count = messages.len();
        let Some(transcript) = Transcript::restored(messages) else {
            warn!("cached transcript has no message id left, ignoring it");
            return None;
        };
        debug!("restored {count} messages");
        Some(transcript)
    }

    /// Overwrites the saved transcript.
    pub fn save_transcript(&self, transcript: &Transcript) {
        if self.cache.is_none() {
            return;
        }
        match serde_json::to_string(transcript.messages()) {
            Ok(raw) => self.write(TRANSCRIPT_CACHE_KEY, &raw),
            Err(err) => warn!("failed to serialize transcript: {err}"),
        }
    }

    pub fn load_special_offer_flag(&self) -> bool {
        self.read(SPECIAL_OFFER_CACHE_KEY)
            .is_some_and(|value| value == "true")
    }

    pub fn save_special_offer_flag(&self) {
        self.write(SPECIAL_OFFER_CACHE_KEY, "true");
    }

    fn read(&self, key: &str) -> Option<String> {
        let cache = self.cache.as_ref()?;
        match cache.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!("failed to read {key} from session cache: {err}");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        let Some(cache) = &self.cache else {
            return;
        };
        if let Err(err) = cache.set(key, value) {
            warn!("failed to write {key} to session cache: {err}");
        }
    }
}
