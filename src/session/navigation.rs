/// Remembers the last URL seen and reports route changes.
#[derive(Debug, Clone)]
pub struct NavigationWatcher {
    last_url: String,
}

impl NavigationWatcher {
    pub fn new(initial_url: &str) -> Self {
        Self {
            last_url: initial_url.to_string(),
        }
    }

    /// Returns true only when `current_url` differs from the last one seen.
    pub fn observe(&mut self, current_url: &str) -> bool {
        if self.last_url == current_url {
            return false;
        }
        self.last_url = current_url.to_string();
        true
    }
}
