//! Minimal RIFF/WAVE wrapper for the raw PCM returned by speech synthesis.

pub const WAV_CHANNELS: u16 = 1;
pub const WAV_SAMPLE_RATE: u32 = 24_000;
pub const WAV_BITS_PER_SAMPLE: u16 = 16;

/// Wraps headerless PCM in a WAV container with the fixed narration
/// parameters: mono, 24 kHz, 16-bit little-endian samples.
pub fn wrap_pcm_in_wav(pcm: &[u8]) -> Vec<u8> {
    let byte_rate =
        WAV_SAMPLE_RATE * u32::from(WAV_CHANNELS) * u32::from(WAV_BITS_PER_SAMPLE) / 8;
    let block_align = WAV_CHANNELS * WAV_BITS_PER_SAMPLE / 8;
    let data_len = pcm.len() as u32;

    let mut out = Vec::with_capacity(44 + pcm.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&WAV_CHANNELS.to_le_bytes());
    out.extend_from_slice(&WAV_SAMPLE_RATE.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&WAV_BITS_PER_SAMPLE.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(pcm);
    out
}
