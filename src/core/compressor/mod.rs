//! # 블록 압축 파이프라인
//!
//! 이미지를 F×F 블록으로 나눠 변환, 주파수 마스크, 역변환, 양자화를 거쳐
//! ⌊H/F⌋·F × ⌊W/F⌋·F 크기의 재구성 이미지를 만든다.

pub mod block_compressor;

pub use block_compressor::{compress, quantize, BlockCompressor, BlockLayout};

#[cfg(test)]
mod __tests__;
