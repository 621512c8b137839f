//! 압축 코어 오류 타입

use thiserror::Error;

/// 압축 코어 결과 타입
pub type Result<T> = std::result::Result<T, CompressError>;

/// 압축 코어 오류
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompressError {
    /// 잘못된 인자 (F = 0, 블록보다 작은 이미지, 정사각형이 아닌 격자 등)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 검증 단계에서 허용 오차를 넘는 수치 오차
    #[error("Numeric tolerance exceeded in {context}: max error {max_error:.3e} > tolerance {tolerance:.3e}")]
    NumericTolerance {
        context: String,
        max_error: f64,
        tolerance: f64,
    },
}

impl CompressError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        CompressError::InvalidArgument(msg.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CompressError::InvalidArgument(_))
    }
}
