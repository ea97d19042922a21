use std::cell::RefCell;

/// Titles currently being expanded in one render tree, root first.
///
/// A title is on the stack at most once; that is what stops cycles.
#[derive(Debug, Default)]
pub struct InclusionStack {
    titles: Vec<String>,
}

impl InclusionStack {
    pub fn root(&self) -> Option<&str> {
        self.titles.first().map(String::as_str)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.iter().any(|t| t == title)
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// Holds one title on an [`InclusionStack`] and pops it when dropped,
/// including during unwinding.
#[derive(Debug)]
pub struct InclusionGuard<'c> {
    stack: &'c RefCell<InclusionStack>,
}

impl<'c> InclusionGuard<'c> {
    /// Pushes `title`, or returns `None` if it is already on the stack.
    pub fn enter(stack: &'c RefCell<InclusionStack>, title: &str) -> Option<Self> {
        let mut inner = stack.borrow_mut();
        if inner.contains(title) {
            return None;
        }
        inner.titles.push(title.to_string());
        Some(Self { stack })
    }
}

impl Drop for InclusionGuard<'_> {
    fn drop(&mut self) {
        self.stack.borrow_mut().titles.pop();
    }
}
