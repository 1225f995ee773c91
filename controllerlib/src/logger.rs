use std::fmt;

use log::{Level, Log, Metadata, Record};

const TARGET: &str = "controllerlib";

/// Key/value pairs attached to a record through `log`'s `kv` API.
pub type Tags<'t> = [(&'t str, &'t str)];

/// Leveled logger handle passed into the patch operation.
///
/// `Logger::global()` resolves whatever was installed with `log::set_logger`
/// (fern in the operator binary). Until something is installed that is
/// the `log` crate's no-op logger.
#[derive(Clone, Copy)]
pub struct Logger<'a> {
    inner: &'a dyn Log,
}

impl<'a> Logger<'a> {
    pub fn new(inner: &'a dyn Log) -> Self {
        Logger { inner }
    }

    /// Uses the given logger, or the process-wide one when `None`.
    pub fn from_context(inner: Option<&'a dyn Log>) -> Self {
        match inner {
            Some(inner) => Logger::new(inner),
            None => Logger::global(),
        }
    }

    pub fn info(&self, args: fmt::Arguments<'_>, tags: &Tags<'_>) {
        self.emit(Level::Info, args, tags);
    }

    pub fn debug(&self, args: fmt::Arguments<'_>, tags: &Tags<'_>) {
        self.emit(Level::Debug, args, tags);
    }

    pub fn error(&self, args: fmt::Arguments<'_>, tags: &Tags<'_>) {
        self.emit(Level::Error, args, tags);
    }

    fn emit(&self, level: Level, args: fmt::Arguments<'_>, tags: &Tags<'_>) {
        let metadata = Metadata::builder().level(level).target(TARGET).build();
        if !self.inner.enabled(&metadata) {
            return;
        }
        self.inner.log(
            &Record::builder()
                .metadata(metadata)
                .args(args)
                .key_values(&tags)
                .build(),
        );
    }
}

impl Logger<'static> {
    pub fn global() -> Self {
        Logger {
            inner: log::logger(),
        }
    }
}

impl Default for Logger<'static> {
    fn default() -> Self {
        Logger::global()
    }
}

impl fmt::Debug for Logger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use log::kv::{self, Key, Value, VisitSource};
    use log::{Level, Log, Metadata, Record};

    #[derive(Debug, Clone)]
    pub struct Captured {
        pub level: Level,
        pub message: String,
        pub tags: Vec<(String, String)>,
    }

    struct CollectTags(Vec<(String, String)>);

    impl<'kvs> VisitSource<'kvs> for CollectTags {
        fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
            self.0.push((key.to_string(), value.to_string()));
            Ok(())
        }
    }

    /// Keeps every record it receives, at any level.
    #[derive(Default)]
    pub struct CapturingLogger {
        captured: Mutex<Vec<Captured>>,
    }

    impl CapturingLogger {
        pub fn captured(&self) -> Vec<Captured> {
            self.captured.lock().unwrap().clone()
        }

        pub fn records(&self) -> Vec<(Level, String)> {
            self.captured()
                .into_iter()
                .map(|c| (c.level, c.message))
                .collect()
        }

        pub fn messages_at(&self, level: Level) -> Vec<String> {
            self.captured()
                .into_iter()
                .filter(|c| c.level == level)
                .map(|c| c.message)
                .collect()
        }

        /// Tags of the first record with exactly this message.
        pub fn tags_of(&self, message: &str) -> Vec<(String, String)> {
            self.captured()
                .into_iter()
                .find(|c| c.message == message)
                .map(|c| c.tags)
                .unwrap_or_default()
        }
    }

    impl Log for CapturingLogger {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            let mut tags = CollectTags(vec![]);
            record.key_values().visit(&mut tags).unwrap();
            self.captured.lock().unwrap().push(Captured {
                level: record.level(),
                message: record.args().to_string(),
                tags: tags.0,
            });
        }

        fn flush(&self) {}
    }

    pub fn tags(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}
