use crc32fast::Hasher;

/// Stable short id for a session or document seed using CRC32
pub fn get_document_id(seed: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(seed.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential block id generator.
///
/// Ids look like `<seed>-<n>`; the counter only moves forward, so one
/// generator never hands out the same id twice.
#[derive(Debug, Clone)]
pub struct IDGenerator {
    seed: String, // CRC32 of the session seed
    count: u32,
}

impl IDGenerator {
    pub fn new(seed: &str) -> Self {
        Self {
            seed: get_document_id(seed),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Next id for which `taken` returns false
    pub fn new_id_avoiding(&mut self, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let id = self.new_id();
            if !taken(&id) {
                return id;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
