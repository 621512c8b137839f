pub mod mask_test;
