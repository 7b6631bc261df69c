use std::sync::{Arc, RwLock};

// Where `print` and friends write. The evaluator never touches stdout
// directly, so tests can swap in a capturing sink.
pub trait OutputEmitterIO {
    fn emit(&self, text: &str);
}

#[derive(Debug, Clone, Copy)]
pub struct ConsoleOutputEmitterIO;

impl OutputEmitterIO for ConsoleOutputEmitterIO {
    fn emit(&self, text: &str) {
        println!("{text}");
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NullOutputEmitterIO;

impl OutputEmitterIO for NullOutputEmitterIO {
    fn emit(&self, _text: &str) {}
}

#[derive(Debug, Default, Clone)]
pub struct VectorOutputEmitterIO {
    pub lines: Arc<RwLock<Vec<String>>>,
}

impl VectorOutputEmitterIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<String> {
        let mut lines = self.write_lock();
        std::mem::take(&mut *lines)
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, Vec<String>> {
        self.lines.write().expect("Output lock poisoned")
    }
}

impl OutputEmitterIO for VectorOutputEmitterIO {
    fn emit(&self, text: &str) {
        let mut lines = self.write_lock();

        lines.push(text.to_string());
    }
}
