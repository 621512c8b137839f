pub mod block_compressor_test;
