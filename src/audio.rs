//! Audio input and spectrum analysis.
//!
//! Live capture comes from the default input device; a WAV file can stand in
//! for it. Both feed the same [`Analyser`] and implement
//! [`SampleSource`](crate::signal::SampleSource).

mod analyser;
mod system;
mod wav;

pub use analyser::Analyser;
pub use system::AudioSystem;
pub use wav::WavSource;

use crate::signal::{SampleBuffer, SampleDomain};

/// Run `window` through the analyser into `buffer` for the requested domain
fn analyse_into(
    analyser: &mut Analyser,
    window: &[f32],
    domain: SampleDomain,
    buffer: &mut SampleBuffer,
) {
    let bins = analyser.bin_count();
    let out = buffer.prepare(domain, bins);
    match domain {
        SampleDomain::Frequency => analyser.frequency_bytes(window, out),
        SampleDomain::TimeDomain => Analyser::time_domain_bytes(window, out),
    }
}
