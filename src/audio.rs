//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects, no external files needed. The
//! event-to-sound mapping is platform independent; playback is wasm only.

use crate::game::MatchEvent;
use crate::sim::{Runs, SimEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bowler releases the ball
    Delivery,
    /// Bat meets ball
    BatHit,
    /// Ball hits the field edge
    Bounce,
    /// Boundary four
    Four,
    /// Maximum
    Six,
    /// Fielder takes a catch
    Wicket,
    /// Target reached
    MatchWon,
    /// Side all out
    AllOut,
}

impl SoundEffect {
    pub fn for_sim_event(event: &SimEvent) -> Option<Self> {
        match event {
            SimEvent::BallReleased => Some(SoundEffect::Delivery),
            SimEvent::ShotPlayed { .. } => Some(SoundEffect::BatHit),
            SimEvent::Bounced => Some(SoundEffect::Bounce),
            SimEvent::Out { .. } => Some(SoundEffect::Wicket),
            SimEvent::DeliveryStarted | SimEvent::Score { .. } => None,
        }
    }

    pub fn for_match_event(event: &MatchEvent) -> Option<Self> {
        match event {
            MatchEvent::Scored { runs, .. } if *runs == Runs::SIX => Some(SoundEffect::Six),
            MatchEvent::Scored { runs, .. } if *runs == Runs::FOUR => Some(SoundEffect::Four),
            MatchEvent::MatchWon { .. } => Some(SoundEffect::MatchWon),
            MatchEvent::AllOut { .. } => Some(SoundEffect::AllOut),
            _ => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::settings::Settings;

    /// One enveloped oscillator note
    struct Tone {
        freq: f32,
        /// Glide target over the note length
        end_freq: Option<f32>,
        wave: OscillatorType,
        peak: f32,
        delay: f64,
        length: f64,
    }

    impl Tone {
        fn new(freq: f32, wave: OscillatorType, peak: f32, length: f64) -> Self {
            Self {
                freq,
                end_freq: None,
                wave,
                peak,
                delay: 0.0,
                length,
            }
        }

        fn glide(mut self, to: f32) -> Self {
            self.end_freq = Some(to);
            self
        }

        fn after(mut self, delay: f64) -> Self {
            self.delay = delay;
            self
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        pub fn set_muted(&mut self, muted: bool, settings: &Settings) {
            self.volume = if muted { 0.0 } else { settings.master_volume.clamp(0.0, 1.0) };
        }

        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            use OscillatorType::*;
            let tones: Vec<Tone> = match effect {
                SoundEffect::Delivery => {
                    vec![Tone::new(220.0, Triangle, vol * 0.25, 0.2).glide(520.0)]
                }
                SoundEffect::BatHit => vec![
                    Tone::new(180.0, Square, vol * 0.4, 0.08).glide(90.0),
                    Tone::new(900.0, Sine, vol * 0.2, 0.05),
                ],
                SoundEffect::Bounce => vec![Tone::new(120.0, Sine, vol * 0.3, 0.1).glide(70.0)],
                SoundEffect::Four => [500.0, 650.0, 800.0]
                    .iter()
                    .enumerate()
                    .map(|(i, f)| Tone::new(*f, Triangle, vol * 0.3, 0.3).after(i as f64 * 0.1))
                    .collect(),
                SoundEffect::Six => [500.0, 600.0, 750.0, 900.0, 1200.0]
                    .iter()
                    .enumerate()
                    .map(|(i, f)| Tone::new(*f, Triangle, vol * 0.3, 0.35).after(i as f64 * 0.08))
                    .collect(),
                SoundEffect::Wicket => vec![
                    Tone::new(700.0, Sawtooth, vol * 0.3, 0.15),
                    Tone::new(300.0, Sine, vol * 0.3, 0.4).glide(120.0).after(0.1),
                ],
                SoundEffect::MatchWon => [400.0, 500.0, 600.0, 800.0]
                    .iter()
                    .enumerate()
                    .map(|(i, f)| Tone::new(*f, Triangle, vol * 0.3, 0.5).after(i as f64 * 0.1))
                    .collect(),
                SoundEffect::AllOut => [400.0, 350.0, 300.0, 200.0]
                    .iter()
                    .enumerate()
                    .map(|(i, f)| Tone::new(*f, Sine, vol * 0.3, 0.4).after(i as f64 * 0.2))
                    .collect(),
            };

            for tone in &tones {
                self.play_tone(ctx, tone);
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            wave: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(wave);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_tone(&self, ctx: &AudioContext, tone: &Tone) {
            let Some((osc, gain)) = self.create_osc(ctx, tone.freq, tone.wave) else {
                return;
            };
            let t = ctx.current_time() + tone.delay;

            gain.gain().set_value_at_time(tone.peak, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + tone.length * 0.8)
                .ok();
            if let Some(end) = tone.end_freq {
                osc.frequency().set_value_at_time(tone.freq, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(end, t + tone.length * 0.8)
                    .ok();
            }

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + tone.length).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TimingQuality;

    #[test]
    fn test_sim_event_sounds() {
        assert_eq!(
            SoundEffect::for_sim_event(&SimEvent::ShotPlayed {
                quality: TimingQuality::Mistimed
            }),
            Some(SoundEffect::BatHit)
        );
        assert_eq!(
            SoundEffect::for_sim_event(&SimEvent::Out {
                fielder: "Slip".into()
            }),
            Some(SoundEffect::Wicket)
        );
        assert_eq!(
            SoundEffect::for_sim_event(&SimEvent::Score { runs: Runs::SIX }),
            None
        );
    }

    #[test]
    fn test_boundaries_get_their_own_sound() {
        let six = MatchEvent::Scored {
            runs: Runs::SIX,
            tokens: 100,
        };
        let two = MatchEvent::Scored {
            runs: Runs::TWO,
            tokens: 2,
        };
        assert_eq!(SoundEffect::for_match_event(&six), Some(SoundEffect::Six));
        assert_eq!(SoundEffect::for_match_event(&two), None);
        assert_eq!(
            SoundEffect::for_match_event(&MatchEvent::AllOut { runs: 12 }),
            Some(SoundEffect::AllOut)
        );
    }
}
