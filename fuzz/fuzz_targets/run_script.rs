#![no_main]

use std::path::Path;

use describe::bus::{EventBus, Subscription};
use describe::script::ScriptRun;
use describe::tracer::FrameStack;
use describe::EventKind;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(script) = describe_syntax::parse_source(source) else {
        return;
    };

    let bus = EventBus::shared();
    let frames = FrameStack::shared();
    let mut subscription = Subscription::new(bus.clone());
    let depth = frames.clone();
    subscription.on(EventKind::Syntax, move |_| {
        assert!(depth.depth() > 0);
        Ok(())
    });

    let _ = ScriptRun::new(Path::new("fuzz.spec.bdd"), source, &bus, &frames).run(&script);
    assert_eq!(frames.depth(), 0);
});
