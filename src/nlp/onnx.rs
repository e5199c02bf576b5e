//! ONNX Runtime backend for the pretrained transformer pipelines.
//!
//! Each model directory holds `config.json`, `tokenizer.json` and
//! `model.onnx` as laid out by `fetch-models` (or an `optimum-cli export onnx`
//! run). Graph inputs are matched by name, so encoder exports with or without
//! `token_type_ids` both work.

use std::{path::Path, sync::Arc};

use ndarray::{Array1, Array2, ArrayD, Axis, CowArray, Ix2, Ix3, IxDyn};
use ort::{
    tensor::OrtOwnedTensor, Environment, GraphOptimizationLevel, OrtError, Session,
    SessionBuilder, Value,
};
use tokenizers::{Encoding, Tokenizer, TruncationParams, TruncationStrategy};
use tracing::debug;

use crate::{
    data::hub::{self, CONFIG_FILE, MODEL_FILE, TOKENIZER_FILE},
    error::{NlpError, Result},
    nlp::{
        labels::ModelConfig,
        math::{argmax, softmax, softmax_rows},
        ner::{group_entities, EntityGroup, Ner, TokenTag},
        sentiment::{SentimentModel, SentimentPrediction},
        zero_shot::{hypothesis, ZeroShotModel, ZeroShotOutput, ZeroShotRequest},
    },
};

fn inference_err(err: OrtError) -> NlpError {
    NlpError::Inference(err.to_string())
}

fn shape_err(err: ndarray::ShapeError) -> NlpError {
    NlpError::Inference(format!("unexpected logits shape: {err}"))
}

/// Shared ONNX Runtime environment for every session.
pub fn environment() -> Result<Arc<Environment>> {
    Environment::builder()
        .with_name("nlp-gateway")
        .build()
        .map(Environment::into_arc)
        .map_err(inference_err)
}

/// Cap encodings at `max_tokens`, special tokens included. Only the first
/// sequence is shortened, so a pair keeps its whole hypothesis.
pub fn truncate_first(tokenizer: &mut Tokenizer, max_tokens: usize) -> Result<()> {
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: max_tokens,
            strategy: TruncationStrategy::OnlyFirst,
            ..TruncationParams::default()
        }))
        .map_err(|err| NlpError::Tokenization(err.to_string()))?;
    Ok(())
}

/// Graph, tokenizer and label map of one exported model.
pub struct OnnxModel {
    session: Session,
    tokenizer: Tokenizer,
    config: ModelConfig,
}

impl OnnxModel {
    pub fn load(environment: &Arc<Environment>, dir: &Path) -> Result<Self> {
        let missing = hub::missing_files(dir);
        if !missing.is_empty() {
            return Err(NlpError::ModelFiles {
                path: dir.to_path_buf(),
                detail: format!(
                    "missing {}; run `nlp-gateway fetch-models` first",
                    missing.join(", ")
                ),
            });
        }
        let mut tokenizer =
            Tokenizer::from_file(dir.join(TOKENIZER_FILE)).map_err(|err| NlpError::ModelFiles {
                path: dir.to_path_buf(),
                detail: err.to_string(),
            })?;
        let config = ModelConfig::from_file(&dir.join(CONFIG_FILE))?;
        truncate_first(&mut tokenizer, config.max_tokens())?;
        let threads = std::thread::available_parallelism()
            .map(|n| n.get().min(i16::MAX as usize) as i16)
            .unwrap_or(1);
        let session = SessionBuilder::new(environment)
            .and_then(|builder| builder.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|builder| builder.with_intra_threads(threads))
            .and_then(|builder| builder.with_model_from_file(dir.join(MODEL_FILE)))
            .map_err(inference_err)?;
        debug!(
            path = %dir.display(),
            labels = config.id2label.len(),
            inputs = session.inputs.len(),
            "onnx session ready"
        );
        Ok(Self {
            session,
            tokenizer,
            config,
        })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Encode a single sequence with character offsets.
    pub fn encode(&self, text: &str) -> Result<Encoding> {
        self.tokenizer
            .encode_char_offsets(text, true)
            .map_err(|err| NlpError::Tokenization(err.to_string()))
    }

    /// Encode a premise/hypothesis pair.
    pub fn encode_pair(&self, premise: &str, hypothesis: &str) -> Result<Encoding> {
        self.tokenizer
            .encode((premise, hypothesis), true)
            .map_err(|err| NlpError::Tokenization(err.to_string()))
    }

    fn pad_id(&self) -> i64 {
        self.tokenizer
            .get_padding()
            .map(|p| p.pad_id)
            .or_else(|| self.tokenizer.token_to_id("[PAD]"))
            .or_else(|| self.tokenizer.token_to_id("<pad>"))
            .unwrap_or(0) as i64
    }

    /// Run a right-padded batch and return the first output tensor.
    pub fn logits(&self, encodings: &[Encoding]) -> Result<ArrayD<f32>> {
        let width = encodings.iter().map(Encoding::len).max().unwrap_or(0);
        let batch = encodings.len();

        let mut input_ids = Array2::<i64>::from_elem((batch, width), self.pad_id());
        let mut attention_mask = Array2::<i64>::zeros((batch, width));
        let mut token_type_ids = Array2::<i64>::zeros((batch, width));
        for (row, encoding) in encodings.iter().enumerate() {
            let tokens = encoding
                .get_ids()
                .iter()
                .zip(encoding.get_attention_mask())
                .zip(encoding.get_type_ids());
            for (col, ((&id, &mask), &kind)) in tokens.enumerate() {
                input_ids[[row, col]] = id as i64;
                attention_mask[[row, col]] = mask as i64;
                token_type_ids[[row, col]] = kind as i64;
            }
        }

        let named = [
            ("input_ids", input_ids),
            ("attention_mask", attention_mask),
            ("token_type_ids", token_type_ids),
        ];
        let arrays = self
            .session
            .inputs
            .iter()
            .map(|input| {
                named
                    .iter()
                    .find(|(name, _)| *name == input.name)
                    .map(|(_, array)| CowArray::from(array.view().into_dyn()))
                    .ok_or_else(|| {
                        NlpError::Inference(format!("unsupported graph input `{}`", input.name))
                    })
            })
            .collect::<Result<Vec<CowArray<'_, i64, IxDyn>>>>()?;
        let values = arrays
            .iter()
            .map(|array| Value::from_array(self.session.allocator(), array))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(inference_err)?;

        let outputs = self.session.run(values).map_err(inference_err)?;
        let first = outputs
            .first()
            .ok_or_else(|| NlpError::Inference("model produced no outputs".into()))?;
        let logits: OrtOwnedTensor<f32, _> = first.try_extract().map_err(inference_err)?;
        let owned = logits.view().to_owned();
        Ok(owned)
    }
}

/// Sequence classifier such as the SST-2 DistilBERT.
pub struct OnnxSentiment {
    model: OnnxModel,
}

impl OnnxSentiment {
    pub fn load(environment: &Arc<Environment>, dir: &Path) -> Result<Self> {
        Ok(Self {
            model: OnnxModel::load(environment, dir)?,
        })
    }
}

impl SentimentModel for OnnxSentiment {
    fn predict(&self, text: &str) -> Result<SentimentPrediction> {
        let encoding = self.model.encode(text)?;
        let logits = self
            .model
            .logits(std::slice::from_ref(&encoding))?
            .into_dimensionality::<Ix2>()
            .map_err(shape_err)?;
        let probs = softmax_rows(&logits);
        let (id, score) = argmax(probs.row(0))
            .ok_or_else(|| NlpError::Inference("empty sentiment logits".into()))?;
        Ok(SentimentPrediction {
            label: self.model.config().label(id),
            score,
        })
    }
}

/// NLI model scoring each label as an entailment hypothesis.
pub struct OnnxZeroShot {
    model: OnnxModel,
    entailment: usize,
    contradiction: usize,
}

impl OnnxZeroShot {
    pub fn load(environment: &Arc<Environment>, dir: &Path) -> Result<Self> {
        let model = OnnxModel::load(environment, dir)?;
        let entailment = model.config().find_label("entailment").ok_or_else(|| {
            NlpError::Config(format!(
                "{} has no `entailment` label; not an NLI model",
                dir.display()
            ))
        })?;
        let contradiction = model.config().find_label("contradiction").unwrap_or(0);
        Ok(Self {
            model,
            entailment,
            contradiction,
        })
    }
}

impl ZeroShotModel for OnnxZeroShot {
    fn classify(&self, request: &ZeroShotRequest<'_>) -> Result<ZeroShotOutput> {
        if request.labels.is_empty() {
            return Ok(ZeroShotOutput::ranked(request.text, Vec::new()));
        }
        let encodings = request
            .labels
            .iter()
            .map(|label| {
                let hypothesis = hypothesis(request.hypothesis_template, label)?;
                self.model.encode_pair(request.text, &hypothesis)
            })
            .collect::<Result<Vec<_>>>()?;
        let logits = self
            .model
            .logits(&encodings)?
            .into_dimensionality::<Ix2>()
            .map_err(shape_err)?;

        let entail: Array1<f32> = logits.column(self.entailment).to_owned();
        let scores: Vec<f32> = if request.multi_label {
            let contra = logits.column(self.contradiction);
            entail
                .iter()
                .zip(contra.iter())
                .map(|(&e, &c)| softmax(&[c, e])[1])
                .collect()
        } else {
            softmax(&entail.to_vec())
        };

        let pairs = request.labels.iter().cloned().zip(scores).collect();
        Ok(ZeroShotOutput::ranked(request.text, pairs))
    }
}

/// Token classifier such as the CoNLL-03 BERT.
pub struct OnnxNer {
    model: OnnxModel,
}

impl OnnxNer {
    pub fn load(environment: &Arc<Environment>, dir: &Path) -> Result<Self> {
        Ok(Self {
            model: OnnxModel::load(environment, dir)?,
        })
    }
}

impl Ner for OnnxNer {
    fn extract(&self, text: &str) -> Result<Vec<EntityGroup>> {
        let encoding = self.model.encode(text)?;
        let logits = self
            .model
            .logits(std::slice::from_ref(&encoding))?
            .into_dimensionality::<Ix3>()
            .map_err(shape_err)?;
        let probs = softmax_rows(&logits.index_axis(Axis(0), 0).to_owned());

        let offsets = encoding.get_offsets();
        let special = encoding.get_special_tokens_mask();
        let mut tokens = Vec::with_capacity(offsets.len());
        for (row, (&(start, end), &is_special)) in offsets.iter().zip(special).enumerate() {
            if is_special == 1 || start == end {
                continue;
            }
            let Some((id, score)) = argmax(probs.row(row)) else {
                continue;
            };
            tokens.push(TokenTag {
                tag: self.model.config().label(id),
                score,
                start,
                end,
            });
        }
        Ok(group_entities(text, &tokens))
    }
}
