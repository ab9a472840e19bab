use std::sync::Arc;

use rayon::prelude::*;

use plagcheck_config::CancellationToken;
use plagcheck_fingerprint::{winnow, Fingerprint};
use plagcheck_fragment::reconstruct;
use plagcheck_index::{apply_frequency_cap, build_index, suppress_template};
use plagcheck_match::aggregate_pairs;
use plagcheck_report::{FileView, PairInput, Report};
use plagcheck_score::{score_pair, summarize};
use plagcheck_types::{File, Language, Token, Warning};

use crate::error::PlagCheckError;
use crate::report_id::generate_report_id;
use crate::request::AnalyzeRequest;

/// Run the full pipeline: validate, tokenize, fingerprint, index, filter,
/// aggregate, reconstruct, score, assemble.
///
/// Tokenization and fingerprinting are the only stages expensive enough
/// per file to parallelize; everything downstream operates on the whole
/// file set at once and is already linear in total fingerprint count.
pub fn analyze(request: AnalyzeRequest) -> Result<Arc<Report>, PlagCheckError> {
    request
        .options
        .validate()
        .map_err(PlagCheckError::InvalidConfig)?;

    let language = Language::parse(&request.language)
        .ok_or_else(|| PlagCheckError::UnsupportedLanguage(request.language.clone()))?;

    if request.files.len() < 2 {
        return Err(PlagCheckError::InsufficientInput(request.files.len()));
    }

    let cancellation = request.options.cancellation.clone();
    let kgram_length = request.options.kgram_length;
    let window_size = request.options.window_size;

    let files: Vec<File> = request
        .files
        .iter()
        .enumerate()
        .map(|(id, input)| {
            let info = (input.student_id.is_some() || input.student_name.is_some()).then(|| {
                plagcheck_types::SubmitterInfo {
                    student_id: input.student_id.clone(),
                    student_name: input.student_name.clone(),
                }
            });
            File::with_info(id as u32, input.path.clone(), input.content.clone(), info)
        })
        .collect();

    let (tokens, mut warnings) = tokenize_all(language, &files, cancellation.as_ref())?;

    if let Some(token) = &cancellation {
        if token.is_cancelled() {
            return Err(PlagCheckError::Cancelled);
        }
    }

    let fingerprints = fingerprint_all(&tokens, kgram_length, window_size, cancellation.as_ref())?;

    let mut index = build_index(&fingerprints);

    if let Some(template_input) = &request.template {
        let (template_tokens, _) = plagcheck_lex::tokenize(language, &template_input.content);
        let template_fingerprints = winnow(&template_tokens, kgram_length, window_size);
        suppress_template(&mut index, &template_fingerprints);
    }

    if let Some(warning) = apply_frequency_cap(
        &mut index,
        files.len(),
        request.options.freq_abs_cap,
        request.options.freq_rel_cap,
    ) {
        warnings.push(warning);
    }

    if let Some(token) = &cancellation {
        if token.is_cancelled() {
            return Err(PlagCheckError::Cancelled);
        }
    }

    let (pair_matches, match_warnings) = aggregate_pairs(&index, request.options.match_event_cap);
    warnings.extend(match_warnings);

    let mut pair_inputs = Vec::with_capacity(pair_matches.len());
    let mut similarities = Vec::with_capacity(pair_matches.len());

    for ((left_id, right_id), mut matches) in pair_matches {
        if let Some(token) = &cancellation {
            if token.is_cancelled() {
                return Err(PlagCheckError::Cancelled);
            }
        }
        matches.sort_by_key(|e| (e.left_pos, e.right_pos));

        let left_tokens = &tokens[left_id as usize];
        let right_tokens = &tokens[right_id as usize];
        let fragments = reconstruct(&matches, kgram_length as u32, left_tokens, right_tokens);
        let score = score_pair(&fragments, left_tokens.len(), right_tokens.len());
        similarities.push(score.similarity);

        pair_inputs.push(PairInput {
            left_file_id: left_id,
            right_file_id: right_id,
            matches,
            score,
            fragments: Some(fragments),
        });
    }

    let summary = summarize(files.len(), &similarities, request.options.threshold);

    let file_views: Vec<FileView> = files
        .iter()
        .map(|f| FileView {
            id: f.id,
            path: f.path.clone(),
            filename: f.filename.clone(),
            line_count: f.line_count,
            student_id: f.info.as_ref().and_then(|i| i.student_id.clone()),
            student_name: f.info.as_ref().and_then(|i| i.student_name.clone()),
        })
        .collect();

    let file_tokens: Vec<Arc<Vec<Token>>> = tokens.into_iter().map(Arc::new).collect();
    let file_content: Vec<Arc<String>> = files.iter().map(|f| Arc::new(f.content.clone())).collect();

    let warning_strings = warnings.into_iter().map(|w| w.to_string()).collect();

    let report = Report::new(
        generate_report_id(),
        file_views,
        file_tokens,
        file_content,
        kgram_length as u32,
        pair_inputs,
        warning_strings,
        summary,
    );

    Ok(Arc::new(report))
}

/// Tokenize every file. With no cancellation token this runs in
/// parallel (tokenization is embarrassingly parallel, one file per
/// task); with one, it runs sequentially so cancellation can be
/// observed between files rather than only after the whole batch.
fn tokenize_all(
    language: Language,
    files: &[File],
    cancellation: Option<&CancellationToken>,
) -> Result<(Vec<Vec<Token>>, Vec<Warning>), PlagCheckError> {
    if let Some(token) = cancellation {
        let mut tokens = Vec::with_capacity(files.len());
        let mut warnings = Vec::new();
        for file in files {
            if token.is_cancelled() {
                return Err(PlagCheckError::Cancelled);
            }
            let (file_tokens, file_warnings) = plagcheck_lex::tokenize(language, &file.content);
            warnings.extend(file_warnings.into_iter().map(|w| w.with_file(file.path.clone())));
            tokens.push(file_tokens);
        }
        Ok((tokens, warnings))
    } else {
        let results: Vec<(Vec<Token>, Vec<Warning>)> = files
            .par_iter()
            .map(|file| {
                let (file_tokens, file_warnings) = plagcheck_lex::tokenize(language, &file.content);
                let file_warnings = file_warnings
                    .into_iter()
                    .map(|w| w.with_file(file.path.clone()))
                    .collect();
                (file_tokens, file_warnings)
            })
            .collect();

        let mut tokens = Vec::with_capacity(results.len());
        let mut warnings = Vec::new();
        for (file_tokens, file_warnings) in results {
            tokens.push(file_tokens);
            warnings.extend(file_warnings);
        }
        Ok((tokens, warnings))
    }
}

/// Fingerprint every file's token stream, same parallel/sequential split
/// as `tokenize_all`.
fn fingerprint_all(
    tokens: &[Vec<Token>],
    kgram_length: usize,
    window_size: usize,
    cancellation: Option<&CancellationToken>,
) -> Result<Vec<(u32, Vec<Fingerprint>)>, PlagCheckError> {
    if let Some(token) = cancellation {
        let mut per_file = Vec::with_capacity(tokens.len());
        for (id, file_tokens) in tokens.iter().enumerate() {
            if token.is_cancelled() {
                return Err(PlagCheckError::Cancelled);
            }
            per_file.push((id as u32, winnow(file_tokens, kgram_length, window_size)));
        }
        Ok(per_file)
    } else {
        Ok(tokens
            .par_iter()
            .enumerate()
            .map(|(id, file_tokens)| (id as u32, winnow(file_tokens, kgram_length, window_size)))
            .collect())
    }
}
