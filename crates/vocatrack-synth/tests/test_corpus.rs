//! Corpus synthesis against an in-process synthesizer.

use std::sync::Mutex;

use pretty_assertions::assert_eq;
use vocatrack_audio::{wav, Assembler, PcmFormat};
use vocatrack_spec::{
    PauseConfig, ProjectConfig, Slot, SynthesisRequest, VersionLayout, WordEntry,
};
use vocatrack_synth::{synthesize_corpus, SynthError, SynthResult, Synthesizer};

/// Emits a short clip whose length depends on the text, recording every request.
#[derive(Default)]
struct ToneSynth {
    seen: Mutex<Vec<SynthesisRequest>>,
    fail_on: Option<&'static str>,
    garbage: bool,
}

impl Synthesizer for ToneSynth {
    fn name(&self) -> &'static str {
        "tone"
    }

    fn synthesize(&self, request: &SynthesisRequest) -> SynthResult<Vec<u8>> {
        self.seen.lock().unwrap().push(request.clone());
        if self.fail_on == Some(request.text.as_str()) {
            return Err(SynthError::process_failed(1, "boom"));
        }
        if self.garbage {
            return Ok(b"not a wav".to_vec());
        }
        let frames = 100 * request.text.chars().count();
        Ok(wav::encode(&PcmFormat::mono16(16000), &[&vec![7u8; frames * 2]]).unwrap())
    }
}

struct Fixture {
    dir: tempfile::TempDir,
    config: ProjectConfig,
    words: Vec<WordEntry>,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("reference.wav");
        std::fs::write(&reference, b"voice").unwrap();
        let config = ProjectConfig {
            reference_audio: reference,
            reference_text: "知道太多会被杀掉。".to_string(),
            output_dir: dir.path().join("vocabulary_audio"),
            ..ProjectConfig::default()
        };
        Self {
            dir,
            config,
            words: vec![WordEntry::new("cat", "猫"), WordEntry::new("dog", "狗")],
        }
    }

    fn layout(&self) -> VersionLayout {
        VersionLayout::new(&self.config.output_dir)
    }
}

#[test]
fn test_writes_every_version_of_every_word() {
    let fx = Fixture::new();
    let synth = ToneSynth::default();
    let mut events = Vec::new();

    let summary = synthesize_corpus(&synth, &fx.config, &fx.words, &fx.layout(), &mut |p| {
        events.push((p.index, p.word.clone(), p.slot, p.version))
    })
    .unwrap();

    assert_eq!(summary.clips_written, 8);
    assert_eq!(summary.versions, 2);
    assert_eq!(
        events,
        vec![
            (1, "cat".to_string(), Slot::Wordform, 1),
            (2, "cat".to_string(), Slot::Meaning, 1),
            (3, "cat".to_string(), Slot::Wordform, 2),
            (4, "cat".to_string(), Slot::Meaning, 2),
            (5, "dog".to_string(), Slot::Wordform, 1),
            (6, "dog".to_string(), Slot::Meaning, 1),
            (7, "dog".to_string(), Slot::Wordform, 2),
            (8, "dog".to_string(), Slot::Meaning, 2),
        ]
    );
    for version in 1..=2 {
        for word in ["cat", "dog"] {
            for slot in Slot::ALL {
                assert!(fx.layout().clip_path(word, slot, version).is_file());
            }
        }
    }
}

#[test]
fn test_requests_carry_languages_and_reference() {
    let fx = Fixture::new();
    let synth = ToneSynth::default();
    synthesize_corpus(&synth, &fx.config, &fx.words[..1], &fx.layout(), &mut |_| {}).unwrap();

    let seen = synth.seen.lock().unwrap();
    assert_eq!(seen.len(), 4);
    assert_eq!(seen[0].text, "cat");
    assert_eq!(seen[0].language, "English");
    assert_eq!(seen[1].text, "猫");
    assert_eq!(seen[1].language, "Chinese");
    assert!(seen.iter().all(|r| r.reference_audio == fx.config.reference_audio));
}

#[test]
fn test_synthesized_corpus_assembles() {
    let fx = Fixture::new();
    synthesize_corpus(&ToneSynth::default(), &fx.config, &fx.words, &fx.layout(), &mut |_| {})
        .unwrap();

    let refs = fx.layout().references(&fx.words, 2);
    let report = Assembler::new(PauseConfig::default())
        .assemble_to_path(&refs, &fx.layout().default_track_path())
        .unwrap();
    assert_eq!(report.words, 2);
    assert_eq!(report.format, PcmFormat::mono16(16000));
}

#[test]
fn test_missing_reference_fails_before_synthesis() {
    let mut fx = Fixture::new();
    fx.config.reference_audio = fx.dir.path().join("absent.wav");
    let synth = ToneSynth::default();

    let err = synthesize_corpus(&synth, &fx.config, &fx.words, &fx.layout(), &mut |_| {})
        .unwrap_err();
    assert!(matches!(err, SynthError::ReferenceUnavailable { .. }));
    assert!(synth.seen.lock().unwrap().is_empty());
}

#[test]
fn test_failure_aborts_run() {
    let fx = Fixture::new();
    let synth = ToneSynth {
        fail_on: Some("狗"),
        ..ToneSynth::default()
    };

    let err = synthesize_corpus(&synth, &fx.config, &fx.words, &fx.layout(), &mut |_| {})
        .unwrap_err();
    assert!(matches!(err, SynthError::ProcessFailed { .. }));
    assert!(fx.layout().clip_path("cat", Slot::Meaning, 2).is_file());
    assert!(!fx.layout().clip_path("dog", Slot::Meaning, 1).exists());
}

#[test]
fn test_undecodable_output_is_not_written() {
    let fx = Fixture::new();
    let synth = ToneSynth {
        garbage: true,
        ..ToneSynth::default()
    };

    let err = synthesize_corpus(&synth, &fx.config, &fx.words, &fx.layout(), &mut |_| {})
        .unwrap_err();
    match err {
        SynthError::InvalidClip { word, slot, .. } => {
            assert_eq!(word, "cat");
            assert_eq!(slot, Slot::Wordform);
        }
        other => panic!("expected invalid clip, got {:?}", other),
    }
    assert!(!fx.layout().clip_path("cat", Slot::Wordform, 1).exists());
}

#[test]
fn test_empty_vocabulary() {
    let fx = Fixture::new();
    let err = synthesize_corpus(&ToneSynth::default(), &fx.config, &[], &fx.layout(), &mut |_| {})
        .unwrap_err();
    assert!(matches!(err, SynthError::EmptyVocabulary));
}
