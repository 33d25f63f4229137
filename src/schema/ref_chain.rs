/// Tracks the chain of `$ref` targets being expanded for circular detection.
pub struct RefChain {
    chain: Vec<String>,
}

impl RefChain {
    pub fn new() -> Self {
        Self { chain: Vec::new() }
    }

    /// Returns the loop, e.g. `Node -> Node`, if `reference` is already being
    /// expanded.
    pub fn cycle_through(&self, reference: &str) -> Option<String> {
        let start = self.chain.iter().position(|entry| entry == reference)?;
        let mut names: Vec<&str> = self.chain[start..].iter().map(|r| ref_name(r)).collect();
        names.push(ref_name(reference));

        Some(names.join(" -> "))
    }

    pub fn push(&mut self, reference: &str) {
        self.chain.push(reference.to_string());
    }

    pub fn pop(&mut self) {
        self.chain.pop();
    }
}

/// Last segment of a JSON pointer reference, e.g. `SubModel` for `#/$defs/SubModel`.
pub fn ref_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}
