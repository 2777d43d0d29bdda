//! # Composition
//!
//! [`BeamLine`] is an ordered sequence of elements, which may itself hold
//! nested lines. [`UnionEle`] groups elements that occupy the same space.

use pals_core::PalsError;
use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::kinds::ElementKind;

/// An ordered, nestable sequence of elements.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BeamLine {
    pub name: String,
    #[serde(default)]
    pub line: Vec<Element>,
}

impl BeamLine {
    /// An empty line.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line: Vec::new(),
        }
    }

    /// Append one element.
    pub fn push(&mut self, element: impl Into<Element>) {
        self.line.push(element.into());
    }

    /// Append every element of `elements`, in order.
    pub fn extend<I>(&mut self, elements: I)
    where
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        self.line.extend(elements.into_iter().map(Into::into));
    }

    /// Append the contents of `other` (not `other` itself as a nested line).
    pub fn extend_from_line(&mut self, other: &BeamLine) {
        self.line.extend(other.line.iter().cloned());
    }

    /// Number of direct entries.
    pub fn len(&self) -> usize {
        self.line.len()
    }

    /// Returns `true` if the line has no entries.
    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// Direct entries, in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.line.iter()
    }

    /// Depth-first walk over every non-line element, descending into
    /// nested lines. Unions are yielded as single entries.
    pub fn iter_flat(&self) -> FlatIter<'_> {
        FlatIter {
            stack: vec![self.line.iter()],
        }
    }

    /// Sum of the lengths of all elements, nested lines included.
    ///
    /// Thin elements contribute nothing.
    pub fn total_length(&self) -> f64 {
        self.iter_flat().filter_map(Element::length).sum()
    }

    /// Re-check every contained element.
    pub fn validate(&self) -> Result<(), PalsError> {
        for element in &self.line {
            element.validate()?;
        }
        Ok(())
    }
}

impl ElementKind for BeamLine {
    const KIND: &'static str = "BeamLine";

    fn name(&self) -> &str {
        &self.name
    }

    fn length(&self) -> Option<f64> {
        Some(self.total_length())
    }
}

impl<'a> IntoIterator for &'a BeamLine {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.line.iter()
    }
}

/// Iterator returned by [`BeamLine::iter_flat`].
#[derive(Debug)]
pub struct FlatIter<'a> {
    stack: Vec<std::slice::Iter<'a, Element>>,
}

impl<'a> Iterator for FlatIter<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(Element::BeamLine(nested)) => self.stack.push(nested.line.iter()),
                Some(element) => return Some(element),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Elements that overlap in space, such as a solenoid around a quadrupole.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UnionEle {
    pub name: String,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl UnionEle {
    pub fn new(name: impl Into<String>, elements: Vec<Element>) -> Self {
        Self {
            name: name.into(),
            elements,
        }
    }

    /// Length of the longest member, or `None` if every member is thin.
    pub fn length(&self) -> Option<f64> {
        self.elements
            .iter()
            .filter_map(Element::length)
            .fold(None, |longest, l| Some(longest.map_or(l, |m: f64| m.max(l))))
    }

    /// Re-check every member.
    pub fn validate(&self) -> Result<(), PalsError> {
        for element in &self.elements {
            element.validate()?;
        }
        Ok(())
    }
}

impl ElementKind for UnionEle {
    const KIND: &'static str = "UnionEle";

    fn name(&self) -> &str {
        &self.name
    }

    fn length(&self) -> Option<f64> {
        UnionEle::length(self)
    }
}
