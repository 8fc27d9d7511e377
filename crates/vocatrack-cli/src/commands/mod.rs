//! CLI command implementations

pub mod assemble;
pub mod doctor;
pub mod inspect;
pub mod json_output;
pub mod plan;
pub mod synthesize;

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs;
    use std::path::{Path, PathBuf};
    use vocatrack_audio::{wav, PcmFormat};
    use vocatrack_spec::Slot;

    use crate::project::Project;

    /// Writes a two-word, one-version project with 40-frame clips.
    pub(crate) fn project_with_clips(dir: &Path, format: PcmFormat) -> PathBuf {
        fs::write(dir.join("words.csv"), "word|meaning\ncat|猫\ndog|狗\n").unwrap();
        let config = dir.join("vocatrack.json");
        fs::write(&config, r#"{"iterations": 1}"#).unwrap();

        let project = Project::load(&config).unwrap();
        for entry in &project.words {
            for slot in Slot::ALL {
                let path = project.layout().clip_path(&entry.word, slot, 1);
                fs::create_dir_all(path.parent().unwrap()).unwrap();
                let pcm = vec![3u8; 40 * usize::from(format.block_align())];
                fs::write(&path, wav::encode(&format, &[&pcm]).unwrap()).unwrap();
            }
        }
        config
    }
}
