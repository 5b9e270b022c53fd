//! core::catalog
//!
//! The course catalog: an unbalanced binary search tree keyed by course id.
//!
//! # Ownership
//!
//! Each node is owned by its parent through a `Box`, and the root is owned by
//! the catalog. There is no sharing and no parent pointer, so plain exclusive
//! ownership is enough.
//!
//! # Duplicate ids
//!
//! Inserting an id that is already present is a no-op: the existing record,
//! name included, is left as it was. Callers that report "added" regardless
//! get that from the engine, not from here.
//!
//! # Depth
//!
//! There is no rebalancing, so ids inserted in sorted order produce a tree
//! as deep as it is long. Insert, search and teardown are iterative so that
//! depth never turns into call-stack depth.

use std::cmp::Ordering;

use super::types::CourseId;

/// A course record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    name: String,
}

impl Course {
    pub fn id(&self) -> CourseId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

type Link = Option<Box<Node>>;

#[derive(Debug)]
struct Node {
    course: Course,
    left: Link,
    right: Link,
}

impl Node {
    fn leaf(course: Course) -> Box<Self> {
        Box::new(Self {
            course,
            left: None,
            right: None,
        })
    }
}

/// Ordered map from course id to course record.
#[derive(Debug, Default)]
pub struct CourseCatalog {
    root: Link,
    len: usize,
}

impl CourseCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a course.
    ///
    /// Returns `true` if a new record was created, `false` if `id` was
    /// already present (in which case nothing changes).
    ///
    /// # Example
    ///
    /// ```
    /// use registrar::core::catalog::CourseCatalog;
    /// use registrar::core::types::CourseId;
    ///
    /// let mut catalog = CourseCatalog::new();
    /// assert!(catalog.insert(CourseId::new(5), "X"));
    /// assert!(!catalog.insert(CourseId::new(5), "Y"));
    /// assert_eq!(catalog.search(CourseId::new(5)).unwrap().name(), "X");
    /// ```
    pub fn insert(&mut self, id: CourseId, name: impl Into<String>) -> bool {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match id.cmp(&node.course.id) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
        }
        *slot = Some(Node::leaf(Course {
            id,
            name: name.into(),
        }));
        self.len += 1;
        true
    }

    /// Look up a course by id.
    pub fn search(&self, id: CourseId) -> Option<&Course> {
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            link = match id.cmp(&node.course.id) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.course),
            };
        }
        None
    }

    pub fn contains(&self, id: CourseId) -> bool {
        self.search(id).is_some()
    }

    /// Iterate courses in ascending id order.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter { stack: Vec::new() };
        iter.descend_left(self.root.as_deref());
        iter
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Drop for CourseCatalog {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

/// In-order iterator over a [`CourseCatalog`].
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn descend_left(&mut self, mut link: Option<&'a Node>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        Some(&node.course)
    }
}

impl<'a> IntoIterator for &'a CourseCatalog {
    type Item = &'a Course;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
