#![no_main]

use libfuzzer_sys::fuzz_target;

// Reparsing serialized output reaches a fixed point.
fuzz_target!(|data: &[u8]| {
    let Ok(src) = std::str::from_utf8(data) else {
        return;
    };
    let stream = html::tokenize(src);
    let dom = html::build_dom(&stream);
    let once = html::to_html(&dom);
    let twice = html::to_html(&html::parse_document(&once));
    let thrice = html::to_html(&html::parse_document(&twice));
    assert_eq!(twice, thrice);
});
