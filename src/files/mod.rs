//! File decoding and keypoint text I/O
//!
//! This module provides:
//! - Keypoint list save/load in whitespace-delimited text
//! - Image decoding into a displayable source (RGB or channel magnitude)
//! - Point cloud decoding from ASCII xyz and PLY files

pub mod cloud;
pub mod image;
pub mod points;
