pub mod sumsub;
