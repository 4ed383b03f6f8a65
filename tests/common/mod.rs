#![allow(dead_code)]

pub mod temp_files {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::{SystemTime, UNIX_EPOCH};

    // Global counter and lock for thread-safe temporary file creation
    static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);
    static TEMP_LOCK: Mutex<()> = Mutex::new(());

    /// Creates a route table file with a unique name
    pub fn create_temp_table(content: &str, ext: &str) -> PathBuf {
        let _lock = TEMP_LOCK.lock().unwrap();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::SeqCst);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();

        let path = std::env::temp_dir().join(format!(
            "routetrie_test_{}_{}_{}.{}",
            std::process::id(),
            counter,
            nanos,
            ext
        ));

        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn create_temp_yaml(content: &str) -> PathBuf {
        create_temp_table(content, "yaml")
    }

    pub fn create_temp_json(content: &str) -> PathBuf {
        create_temp_table(content, "json")
    }

    pub fn create_temp_toml(content: &str) -> PathBuf {
        create_temp_table(content, "toml")
    }

    /// Cleanup temporary files (best effort)
    pub fn cleanup_temp_files(paths: &[PathBuf]) {
        for path in paths {
            let _ = std::fs::remove_file(path);
        }
    }
}

pub mod controllers {
    use routetrie::{Controller, ControllerFactory, ControllerRegistry};
    use serde_json::Value;
    use std::sync::Arc;

    /// Controller that records the dependencies it was built with
    #[derive(Debug, PartialEq)]
    pub struct FullName {
        pub first: String,
        pub last: String,
    }

    #[derive(Debug)]
    pub struct Blog;

    fn arg(deps: &[Value], index: usize) -> anyhow::Result<String> {
        deps.get(index)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("missing string dependency #{}", index))
    }

    /// Factory knowing `blog` and `full_name`
    pub fn factory() -> Arc<dyn ControllerFactory> {
        let mut registry = ControllerRegistry::new();
        registry.register("blog", |_| Ok(Box::new(Blog) as Controller));
        registry.register("full_name", |deps| {
            Ok(Box::new(FullName {
                first: arg(deps, 0)?,
                last: arg(deps, 1)?,
            }) as Controller)
        });
        Arc::new(registry)
    }
}
