//! Shared helpers for unit tests
//!
//! Descriptor streams are crafted byte by byte with [`DescriptorBuilder`]; the factories
//! in [`gradients`] build whole gradient files laid out like the ones real editors write.


pub use builders::DescriptorBuilder;
pub use gradients::{color_entry, gradient_entry, gradient_file, TestColor, TestGradient};
