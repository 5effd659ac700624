//! Sprite-sheet animation state machine.
//!
//! Each animated entity owns an [`Animator`]: a set of named clips, the clip
//! currently playing, its frame index and the time spent on that frame.
//! One-shot clips hold their last frame and report their end once, as the
//! return value of [`Animator::advance`].

use std::collections::HashMap;

use crate::components::sprite::FrameSource;

/// Definition of a single clip.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDef {
    /// Sheet the frames are cut from.
    pub source: FrameSource,
    /// Number of frames (always at least 1).
    pub frame_count: usize,
    /// Seconds per frame.
    pub frame_interval: f32,
    /// Whether to wrap to frame 0 after the last frame.
    pub looping: bool,
}

impl AnimationDef {
    /// Create a clip from a frame count and a playback rate in frames per second.
    /// A non-positive rate freezes the clip on its first frame.
    pub fn new(source: FrameSource, frame_count: usize, fps: f32, looping: bool) -> Self {
        let frame_interval = if fps > 0.0 { 1.0 / fps } else { f32::INFINITY };
        Self {
            source,
            frame_count: frame_count.max(1),
            frame_interval,
            looping,
        }
    }

    pub fn looped(source: FrameSource, frame_count: usize, fps: f32) -> Self {
        Self::new(source, frame_count, fps, true)
    }

    pub fn once(source: FrameSource, frame_count: usize, fps: f32) -> Self {
        Self::new(source, frame_count, fps, false)
    }

    /// Time for one full pass through the clip.
    pub fn total_duration(&self) -> f32 {
        self.frame_interval * self.frame_count as f32
    }
}

/// Reported by [`Animator::advance`] when a one-shot clip completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationEnded {
    pub clip: String,
}

/// Per-entity animation instance.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    clips: HashMap<String, AnimationDef>,
    current: Option<String>,
    frame_index: usize,
    elapsed: f32,
    end_reported: bool,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a prepared clip set. Nothing plays until [`Animator::play`].
    pub fn with_clips(clips: HashMap<String, AnimationDef>) -> Self {
        Self {
            clips,
            ..Default::default()
        }
    }

    /// Register (or replace) a clip.
    pub fn add(&mut self, name: impl Into<String>, def: AnimationDef) {
        self.clips.insert(name.into(), def);
    }

    pub fn has_clip(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    /// Switch to `name`. Already playing `name` is a no-op unless `force`.
    /// Unknown names are logged and ignored. Returns whether `name` is now
    /// the current clip.
    pub fn play(&mut self, name: &str, force: bool) -> bool {
        if !force && self.current.as_deref() == Some(name) {
            return true;
        }
        if !self.clips.contains_key(name) {
            log::warn!("animation '{}' not found; keeping {:?}", name, self.current);
            return false;
        }
        self.current = Some(name.to_string());
        self.frame_index = 0;
        self.elapsed = 0.0;
        self.end_reported = false;
        true
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current_def(&self) -> Option<&AnimationDef> {
        self.current.as_ref().and_then(|name| self.clips.get(name))
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// True once a one-shot clip has reported its end and is holding its last frame.
    pub fn is_finished(&self) -> bool {
        self.end_reported
    }

    /// Advance by `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> Option<AnimationEnded> {
        let name = self.current.as_ref()?;
        let def = self.clips.get(name)?;

        self.elapsed += dt.max(0.0);
        let mut ended = None;

        while self.elapsed >= def.frame_interval {
            self.elapsed -= def.frame_interval;

            if self.frame_index + 1 < def.frame_count {
                self.frame_index += 1;
            } else if def.looping {
                self.frame_index = 0;
            } else {
                // Hold the last frame; report the completion only once.
                if !self.end_reported {
                    self.end_reported = true;
                    ended = Some(AnimationEnded { clip: name.clone() });
                }
                self.elapsed = 0.0;
                break;
            }
        }

        ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animator() -> Animator {
        let mut anim = Animator::new();
        anim.add("walk", AnimationDef::looped(FrameSource(0), 4, 10.0));
        anim.add("attack", AnimationDef::once(FrameSource(1), 3, 10.0));
        anim
    }

    #[test]
    fn fps_converts_to_interval() {
        let def = AnimationDef::looped(FrameSource(0), 4, 10.0);
        assert!((def.frame_interval - 0.1).abs() < 1e-6);
        assert!((def.total_duration() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn zero_frames_clamps_to_one() {
        let def = AnimationDef::once(FrameSource(0), 0, 10.0);
        assert_eq!(def.frame_count, 1);
    }

    #[test]
    fn looping_clip_wraps() {
        let mut anim = animator();
        assert!(anim.play("walk", false));
        anim.advance(0.15);
        assert_eq!(anim.frame_index(), 1);
        anim.advance(0.3);
        assert_eq!(anim.frame_index(), 0);
        assert!(!anim.is_finished());
    }

    #[test]
    fn one_shot_reports_end_exactly_once() {
        let mut anim = animator();
        anim.play("attack", false);

        // Two intervals reach the last frame; no end yet.
        assert_eq!(anim.advance(0.1), None);
        assert_eq!(anim.advance(0.1), None);
        assert_eq!(anim.frame_index(), 2);

        // The last frame is shown for one interval, then the end is reported.
        let ended = anim.advance(0.1).expect("end should be reported");
        assert_eq!(ended.clip, "attack");
        assert_eq!(anim.frame_index(), 2);

        for _ in 0..20 {
            assert_eq!(anim.advance(0.1), None);
            assert_eq!(anim.frame_index(), 2);
        }
        assert!(anim.is_finished());
    }

    #[test]
    fn large_step_holds_last_frame() {
        let mut anim = animator();
        anim.play("attack", false);
        assert!(anim.advance(5.0).is_some());
        assert_eq!(anim.frame_index(), 2);
    }

    #[test]
    fn replay_same_clip_is_noop_unless_forced() {
        let mut anim = animator();
        anim.play("walk", false);
        anim.advance(0.25);
        assert_eq!(anim.frame_index(), 2);

        anim.play("walk", false);
        assert_eq!(anim.frame_index(), 2);

        anim.play("walk", true);
        assert_eq!(anim.frame_index(), 0);
    }

    #[test]
    fn forced_replay_reports_end_again() {
        let mut anim = animator();
        anim.play("attack", false);
        assert!(anim.advance(1.0).is_some());
        anim.play("attack", true);
        assert!(!anim.is_finished());
        assert!(anim.advance(1.0).is_some());
    }

    #[test]
    fn unknown_clip_keeps_current() {
        let mut anim = animator();
        anim.play("walk", false);
        anim.advance(0.15);
        assert!(!anim.play("fly", false));
        assert_eq!(anim.current(), Some("walk"));
        assert_eq!(anim.frame_index(), 1);
    }

    #[test]
    fn nothing_playing_never_ends() {
        let mut anim = animator();
        assert_eq!(anim.advance(1.0), None);
        assert_eq!(anim.current(), None);
    }

    #[test]
    fn frame_index_stays_in_bounds() {
        let mut anim = animator();
        anim.play("walk", false);
        let mut dt = 0.013;
        for _ in 0..500 {
            anim.advance(dt);
            assert!(anim.frame_index() < 4);
            dt = (dt * 1.7) % 0.35;
        }
    }
}
