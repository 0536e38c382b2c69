#![no_main]

use libfuzzer_sys::fuzz_target;
use scorm_pack::{InputArtifact, PackagerConfig, Repackager};

fuzz_target!(|data: &[u8]| {
    let config = PackagerConfig {
        // Keep memory bounded for hostile archives
        max_entry_size: 1024 * 1024,
        ..PackagerConfig::default()
    };
    let Ok(repackager) = Repackager::new(config) else {
        return;
    };

    // Same bytes as a zipped site and as a single page; neither may panic
    for name in ["fuzz.zip", "fuzz.html"] {
        let input = match InputArtifact::new(name, data.to_vec()) {
            Ok(input) => input,
            Err(_) => continue,
        };

        if let Ok(output) = repackager.repackage(&input) {
            assert!(output.paths.iter().any(|p| p == "imsmanifest.xml"));
            assert!(output.paths.iter().any(|p| *p == output.entry_path));
        }
    }
});
