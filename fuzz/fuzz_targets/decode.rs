#![no_main]

use libfuzzer_sys::fuzz_target;
use grdscope::{DecoderConfig, GradientFile, NullObserver};

fuzz_target!(|data: &[u8]| {
    let _ = GradientFile::from_mem(data.to_vec());
    let _ = GradientFile::from_mem_with_config(data.to_vec(), DecoderConfig::strict(), &mut NullObserver);
});
