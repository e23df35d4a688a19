//! Decoder fuzz target: feed arbitrary text to the single and list decoders.
//! Neither may panic, and anything that decodes must survive an encode/decode cycle.
//! Build with: cargo fuzz run decode_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    if let Ok(device) = devprofile::decode(s) {
        let again = devprofile::decode(&devprofile::encode(&device));
        assert_eq!(again.as_ref(), Ok(&device));
    }
    let _ = devprofile::decode_list(s);
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run decode_fuzz");
}
