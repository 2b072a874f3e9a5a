mod common;

use candle_core::Device;
use common::{tiny_classifier, tiny_config_json, TOKENIZER_JSON};
use sentiment_endpoint::classifier::{Classify, SentimentClassifier};
use sentiment_endpoint::{Error, MAX_SEQUENCE_LENGTH};

#[test]
fn every_input_is_encoded_to_the_fixed_length() -> anyhow::Result<()> {
    let (classifier, _weights) = tiny_classifier();
    let long_text = vec!["great"; 200].join(" ");

    for text in ["", "love", "I love this product!", long_text.as_str()] {
        let encoding = classifier.encode(text)?;
        assert_eq!(encoding.get_ids().len(), MAX_SEQUENCE_LENGTH, "{text:?}");
        assert_eq!(encoding.get_type_ids().len(), MAX_SEQUENCE_LENGTH);
        assert_eq!(encoding.get_attention_mask().len(), MAX_SEQUENCE_LENGTH);
    }
    Ok(())
}

#[test]
fn produces_exactly_two_logits() -> anyhow::Result<()> {
    let (classifier, _weights) = tiny_classifier();
    assert_eq!(classifier.logits("I love this product!")?.len(), 2);
    assert_eq!(classifier.logits("")?.len(), 2);
    Ok(())
}

#[test]
fn predictions_are_deterministic() -> anyhow::Result<()> {
    let (classifier, _weights) = tiny_classifier();
    let text = "I hate this product!";

    let logits = classifier.logits(text)?;
    let sentiment = classifier.predict(text)?;
    for _ in 0..5 {
        assert_eq!(classifier.logits(text)?, logits);
        assert_eq!(classifier.predict(text)?, sentiment);
    }
    Ok(())
}

#[test]
fn loads_a_checkpoint_directory() -> anyhow::Result<()> {
    let (_, weights) = tiny_classifier();
    let dir = tempfile::tempdir()?;
    weights.save(dir.path().join("model.safetensors"))?;
    std::fs::write(
        dir.path().join("config.json"),
        serde_json::to_string(&tiny_config_json())?,
    )?;
    std::fs::write(dir.path().join("tokenizer.json"), TOKENIZER_JSON)?;

    let classifier = SentimentClassifier::load(dir.path(), Device::Cpu)?;
    assert!(classifier.device().is_cpu());

    let sentiment = classifier.predict("great")?;
    assert_eq!(classifier.predict("great")?, sentiment);
    Ok(())
}

#[test]
fn missing_checkpoint_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let result = SentimentClassifier::load(dir.path(), Device::Cpu);
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn broken_tokenizer_fails_to_load() -> anyhow::Result<()> {
    let (_, weights) = tiny_classifier();
    let dir = tempfile::tempdir()?;
    weights.save(dir.path().join("model.safetensors"))?;
    std::fs::write(
        dir.path().join("config.json"),
        serde_json::to_string(&tiny_config_json())?,
    )?;
    std::fs::write(dir.path().join("tokenizer.json"), "{ not a tokenizer")?;

    let result = SentimentClassifier::load(dir.path(), Device::Cpu);
    assert!(matches!(result, Err(Error::Tokenization(_))));
    Ok(())
}
