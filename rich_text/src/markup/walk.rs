//! Depth-first pre/post-order walk over a [`Fragment`].

use super::{Fragment, Markup};

/// One step of a depth-first walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEvent<'a> {
    /// Entering an element (pre-order).
    Enter(&'a str),
    /// A text node.
    Text(&'a str),
    /// Leaving an element (post-order).
    Exit(&'a str),
}

/// Iterator over the walk events of a fragment.
///
/// Uses an explicit stack, so nesting depth is bounded by memory rather than
/// by the call stack.
pub struct Walk<'a> {
    stack: Vec<(Option<&'a str>, std::slice::Iter<'a, Markup>)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = WalkEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (_, children) = self.stack.last_mut()?;

            match children.next() {
                Some(Markup::Text(text)) => return Some(WalkEvent::Text(text.as_str())),
                Some(Markup::Element(element)) => {
                    let name = element.name.as_str();
                    self.stack.push((Some(name), element.children.iter()));
                    return Some(WalkEvent::Enter(name));
                }
                None => {
                    if let Some((Some(name), _)) = self.stack.pop() {
                        return Some(WalkEvent::Exit(name));
                    }
                }
            }
        }
    }
}

impl Fragment {
    /// Walk the fragment depth-first.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(None, self.children.iter())],
        }
    }
}
