use super::config::{Config, NUM_LABELS};
use candle_core::{Module, Result, Tensor};
use candle_nn::{Init, Linear, VarBuilder, VarMap};
use candle_transformers::models::bert::BertModel;

/// BERT encoder with the pooler and a two-label linear head on top.
pub struct BertForSequenceClassification {
    bert: BertModel,
    pooler: Linear,
    classifier: Linear,
}

impl BertForSequenceClassification {
    /// Loads the encoder from `vb`. The pooler and the head are taken from the
    /// checkpoint when it has them and freshly initialised otherwise.
    pub fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        let bert = BertModel::load(vb.clone(), &config.bert_config)?;

        let hidden_size = config.classifier_config.hidden_size;
        let stdev = config.classifier_config.initializer_range;
        let fresh = VarMap::new();
        let fresh_vb = VarBuilder::from_varmap(&fresh, vb.dtype(), vb.device());

        let pooler = linear_or_init(
            &[vb.pp("bert.pooler.dense"), vb.pp("pooler.dense")],
            fresh_vb.pp("pooler"),
            hidden_size,
            hidden_size,
            stdev,
        )?;
        let classifier = linear_or_init(
            &[vb.pp("classifier")],
            fresh_vb.pp("classifier"),
            hidden_size,
            NUM_LABELS,
            stdev,
        )?;

        Ok(Self {
            bert,
            pooler,
            classifier,
        })
    }

    /// Returns logits of shape `[batch, 2]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let hidden = self
            .bert
            .forward(input_ids, token_type_ids, Some(attention_mask))?;
        let cls = hidden.narrow(1, 0, 1)?.squeeze(1)?;
        let pooled = self.pooler.forward(&cls)?.tanh()?;
        self.classifier.forward(&pooled)
    }
}

fn linear_or_init(
    candidates: &[VarBuilder],
    fresh: VarBuilder,
    in_dim: usize,
    out_dim: usize,
    stdev: f64,
) -> Result<Linear> {
    if let Some(vb) = candidates.iter().find(|vb| vb.contains_tensor("weight")) {
        return candle_nn::linear(in_dim, out_dim, vb.clone());
    }

    tracing::warn!(
        layer = %fresh.prefix(),
        "checkpoint has no weights for layer, initialising it"
    );
    let weight = fresh.get_with_hints(
        (out_dim, in_dim),
        "weight",
        Init::Randn { mean: 0., stdev },
    )?;
    let bias = fresh.get_with_hints(out_dim, "bias", Init::Const(0.))?;
    Ok(Linear::new(weight, Some(bias)))
}
