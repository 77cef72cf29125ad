#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate ruhuff;
use ruhuff::FrequencyFile;

// Parsing arbitrary text must never panic, and whatever parses must survive
// being written out and read back.
fuzz_target!(|data: &[u8]| {
    if let Ok(file) = FrequencyFile::parse_bytes(data) {
        assert!(file.table.is_prefix_free());
        let reparsed = FrequencyFile::parse(&file.serialize()).unwrap();
        assert_eq!(reparsed, file);
    }
});
