//! Navigation history

/// Browser-style history: a list of visited paths and a cursor
pub trait History {
    fn current(&self) -> &str;

    /// Append `path` after the cursor, dropping any forward entries
    fn push(&mut self, path: &str);

    /// Move the cursor back; false if already at the first entry
    fn back(&mut self) -> bool;

    /// Move the cursor forward; false if already at the last entry
    fn forward(&mut self) -> bool;
}

#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![initial.to_string()],
            index: 0,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn current(&self) -> &str {
        &self.entries[self.index]
    }

    fn push(&mut self, path: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(path.to_string());
        self.index = self.entries.len() - 1;
    }

    fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_back_forward() {
        let mut history = MemoryHistory::new("/");
        history.push("/login");
        history.push("/dashboard");

        assert!(history.back());
        assert_eq!(history.current(), "/login");
        assert!(history.forward());
        assert_eq!(history.current(), "/dashboard");
        assert!(!history.forward());
    }

    #[test]
    fn test_push_drops_forward_entries() {
        let mut history = MemoryHistory::new("/");
        history.push("/login");
        history.push("/dashboard");
        history.back();
        history.back();

        history.push("/login");

        assert_eq!(history.entries(), &["/".to_string(), "/login".to_string()]);
        assert!(!history.forward());
        assert!(history.back());
        assert!(!history.back());
    }
}
