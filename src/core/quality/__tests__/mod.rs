pub mod experiment_test;
