//! Integration tests for the batch engine

#[cfg(test)]
mod tests {
    use crate::{BatchConfig, BatchEngine, BatchOptions, ProgressEvent, ProgressSink, ProgressStatus};
    use docsift_domain::{Document, ExtractedFields, Fields, FormatTag};
    use docsift_formats::{
        DetectionRule, ExtractorError, ExtractorRegistry, FieldExtractor, FormatDetector,
    };
    use docsift_processor::{DocumentProcessor, TextExtractionError, TextExtractor};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio_test::assert_ok;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }

    /// UTF-8 text extraction with an optional artificial delay and
    /// instrumentation of concurrent in-flight calls.
    struct InstrumentedText {
        delay: Duration,
        current: AtomicUsize,
        peak: AtomicUsize,
    }

    impl InstrumentedText {
        fn new(delay: Duration) -> Self {
            Self {
                delay,
                current: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }

        fn peak(&self) -> usize {
            self.peak.load(Ordering::SeqCst)
        }
    }

    impl TextExtractor for InstrumentedText {
        fn extract_text(&self, bytes: &[u8]) -> Result<String, TextExtractionError> {
            let in_flight = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(in_flight, Ordering::SeqCst);
            if !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
            self.current.fetch_sub(1, Ordering::SeqCst);

            if bytes.is_empty() {
                return Err(TextExtractionError::Empty);
            }
            Ok(String::from_utf8_lossy(bytes).into_owned())
        }
    }

    /// UTF-8 text extraction that panics on documents whose bytes start
    /// with `!`.
    struct VolatileText;

    impl TextExtractor for VolatileText {
        fn extract_text(&self, bytes: &[u8]) -> Result<String, TextExtractionError> {
            if bytes.first() == Some(&b'!') {
                panic!("simulated text extraction crash");
            }
            if bytes.is_empty() {
                return Err(TextExtractionError::Empty);
            }
            Ok(String::from_utf8_lossy(bytes).into_owned())
        }
    }

    /// Parses `key=value` lines; validation requires a `total` field.
    struct LineExtractor;

    impl FieldExtractor for LineExtractor {
        fn extract(
            &self,
            text: &str,
            _capture_diagnostics: bool,
        ) -> Result<ExtractedFields, ExtractorError> {
            let mut fields = Fields::new();
            for line in text.lines() {
                if let Some((key, value)) = line.split_once('=') {
                    fields.insert(key.trim(), value.trim());
                }
            }
            Ok(ExtractedFields::from_fields(fields))
        }

        fn validate(&self, fields: &Fields, document_name: &str) -> Result<(), ExtractorError> {
            if !fields.contains_key("total") {
                return Err(ExtractorError::MissingField {
                    field: "total".to_string(),
                    document: document_name.to_string(),
                });
            }
            Ok(())
        }
    }

    fn engine_with(text: Arc<dyn TextExtractor>, config: BatchConfig) -> BatchEngine {
        let detector = FormatDetector::new(vec![
            DetectionRule::new("INVOICE", ["INVOICE"]),
            DetectionRule::new("RECEIPT", ["RECEIPT"]),
        ]);
        let registry = ExtractorRegistry::new().with("INVOICE", Arc::new(LineExtractor));
        let processor = Arc::new(DocumentProcessor::new(detector, Arc::new(registry), text));
        BatchEngine::new(processor, config).expect("config is valid")
    }

    fn engine(config: BatchConfig) -> BatchEngine {
        engine_with(Arc::new(InstrumentedText::new(Duration::ZERO)), config)
    }

    fn collector() -> (ProgressSink, Arc<Mutex<Vec<ProgressEvent>>>) {
        let events: Arc<Mutex<Vec<ProgressEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let sink_events = events.clone();
        let sink: ProgressSink = Arc::new(move |event| {
            sink_events.lock().unwrap().push(event);
        });
        (sink, events)
    }

    fn good_doc(i: usize) -> Document {
        Document::new(format!("doc_{:03}.pdf", i), b"INVOICE\ntotal=100".to_vec())
    }

    fn malformed_doc(i: usize) -> Document {
        Document::new(format!("bad_{:03}.pdf", i), Vec::new())
    }

    fn crashing_doc(i: usize) -> Document {
        Document::new(format!("boom_{:03}.pdf", i), b"!INVOICE".to_vec())
    }

    #[tokio::test]
    async fn one_outcome_per_document_matched_by_name() {
        init_tracing();
        let engine = engine(BatchConfig::default());
        let (sink, _) = collector();

        let mut documents: Vec<Document> = (0..9).map(good_doc).collect();
        documents.push(malformed_doc(9));
        documents.push(malformed_doc(10));
        documents.push(malformed_doc(11));
        let mut submitted: Vec<String> =
            documents.iter().map(|d| d.name().to_string()).collect();

        let report = assert_ok!(engine.run(documents, BatchOptions::default(), sink).await);

        let mut returned: Vec<String> = report
            .successes
            .iter()
            .map(|s| s.name.clone())
            .chain(report.summary.failures.iter().map(|f| f.name.clone()))
            .collect();
        submitted.sort();
        returned.sort();
        assert_eq!(returned, submitted);
        assert_eq!(report.summary.total, 12);
    }

    #[tokio::test]
    async fn counters_reconcile_at_every_event() {
        let engine = engine(BatchConfig::default());
        let (sink, events) = collector();

        let documents: Vec<Document> = (0..30)
            .map(|i| if i % 5 == 0 { malformed_doc(i) } else { good_doc(i) })
            .collect();

        engine
            .run(documents, BatchOptions::default(), sink)
            .await
            .unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 30);
        let mut previous = 0;
        for event in events.iter() {
            assert_eq!(
                event.successes + event.failures,
                event.processed,
                "counters must reconcile at every event"
            );
            assert!(event.processed > previous, "processed must be monotone");
            previous = event.processed;
        }
        assert_eq!(events.last().unwrap().processed, 30);
    }

    #[tokio::test]
    async fn concurrency_cap_is_respected() {
        let text = Arc::new(InstrumentedText::new(Duration::from_millis(25)));
        let engine = engine_with(text.clone(), BatchConfig::default());
        let (sink, _) = collector();

        let documents: Vec<Document> = (0..20).map(good_doc).collect();
        let options = BatchOptions {
            concurrency: Some(5),
            ..Default::default()
        };

        engine.run(documents, options, sink).await.unwrap();

        let peak = text.peak();
        assert!(peak <= 5, "peak in-flight was {}, cap is 5", peak);
        assert!(peak >= 1);
    }

    #[tokio::test]
    async fn small_batch_emits_one_event_per_document() {
        let engine = engine(BatchConfig::default());
        let (sink, events) = collector();

        let documents: Vec<Document> = (0..50).map(good_doc).collect();
        engine
            .run(documents, BatchOptions::default(), sink)
            .await
            .unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 50);
        assert!(events
            .iter()
            .all(|e| e.status != ProgressStatus::BatchComplete));
    }

    #[tokio::test]
    async fn large_batch_emits_events_at_batch_boundaries_only() {
        let engine = engine(BatchConfig::default());
        let (sink, events) = collector();

        let documents: Vec<Document> = (0..150).map(good_doc).collect();
        engine
            .run(documents, BatchOptions::default(), sink)
            .await
            .unwrap();

        let events = events.lock().unwrap();
        // 150 documents / turbo batch size 50 = 3 boundary events.
        assert_eq!(events.len(), 3);
        assert!(events
            .iter()
            .all(|e| e.status == ProgressStatus::BatchComplete));
        assert_eq!(events[0].current_file, "batch 1 complete");
        assert_eq!(events.last().unwrap().processed, 150);
    }

    #[tokio::test]
    async fn malformed_document_does_not_disturb_siblings() {
        let engine = engine(BatchConfig::default());
        let (sink, _) = collector();

        let mut documents: Vec<Document> = (0..10).map(good_doc).collect();
        documents.push(malformed_doc(99));

        let report = engine
            .run(documents, BatchOptions::default(), sink)
            .await
            .unwrap();

        assert_eq!(report.summary.success_count, 10);
        assert_eq!(report.summary.failure_count, 1);
        assert_eq!(report.summary.failures[0].name, "bad_099.pdf");
        for success in &report.successes {
            assert_eq!(success.fields.get("total"), Some("100"));
        }
    }

    #[tokio::test]
    async fn mismatch_failure_names_both_formats_and_is_highlighted() {
        let engine = engine(BatchConfig::default());
        let (sink, _) = collector();

        let documents = vec![good_doc(0)];
        let options = BatchOptions {
            expected_format: Some(FormatTag::from("RECEIPT")),
            ..Default::default()
        };

        let report = engine.run(documents, options, sink).await.unwrap();

        assert_eq!(report.summary.failure_count, 1);
        let message = &report.summary.failures[0].error;
        assert!(message.contains("RECEIPT"), "missing expected tag: {}", message);
        assert!(message.contains("INVOICE"), "missing detected tag: {}", message);
        assert!(
            message.contains(r#"<span style="background-color: yellow; font-weight: bold;">"#),
            "mismatch message was not highlighted: {}",
            message
        );
    }

    #[tokio::test]
    async fn classification_is_deterministic_across_runs() {
        let engine = engine(BatchConfig::default());

        let make_batch = || -> Vec<Document> {
            (0..20)
                .map(|i| if i % 4 == 0 { malformed_doc(i) } else { good_doc(i) })
                .collect()
        };

        let classify = |report: crate::BatchReport| -> Vec<(String, bool)> {
            let mut classified: Vec<(String, bool)> = report
                .successes
                .iter()
                .map(|s| (s.name.clone(), true))
                .chain(report.summary.failures.iter().map(|f| (f.name.clone(), false)))
                .collect();
            classified.sort();
            classified
        };

        let (sink_a, _) = collector();
        let first = engine
            .run(make_batch(), BatchOptions::default(), sink_a)
            .await
            .unwrap();
        let (sink_b, _) = collector();
        let second = engine
            .run(make_batch(), BatchOptions::default(), sink_b)
            .await
            .unwrap();

        assert_eq!(classify(first), classify(second));
    }

    #[tokio::test]
    async fn turbo_pool_is_reused_until_shutdown() {
        let mut config = BatchConfig::default();
        config.turbo_threshold = 1;
        config.max_workers = 2;
        let engine = engine(config);

        let (sink, _) = collector();
        engine
            .run((0..5).map(good_doc).collect(), BatchOptions::default(), sink)
            .await
            .unwrap();
        assert!(engine.worker_pool().is_active());
        let first = engine.worker_pool().acquire().unwrap();

        let (sink, _) = collector();
        engine
            .run((0..5).map(good_doc).collect(), BatchOptions::default(), sink)
            .await
            .unwrap();
        let second = engine.worker_pool().acquire().unwrap();
        assert!(
            Arc::ptr_eq(&first, &second),
            "sequential turbo calls must reuse the pool"
        );

        engine.shutdown();
        assert!(!engine.worker_pool().is_active());

        let (sink, _) = collector();
        engine
            .run((0..5).map(good_doc).collect(), BatchOptions::default(), sink)
            .await
            .unwrap();
        let fresh = engine.worker_pool().acquire().unwrap();
        assert!(!Arc::ptr_eq(&first, &fresh));
    }

    #[tokio::test]
    async fn bounded_panic_is_downgraded_to_a_failure() {
        let engine = engine_with(Arc::new(VolatileText), BatchConfig::default());
        let (sink, _) = collector();

        let documents: Vec<Document> = (0..8)
            .map(|i| if i == 3 { crashing_doc(i) } else { good_doc(i) })
            .collect();

        let report = assert_ok!(engine.run(documents, BatchOptions::default(), sink).await);

        assert_eq!(report.summary.total, 8);
        assert_eq!(report.summary.success_count, 7);
        assert_eq!(report.summary.failure_count, 1);
        let failure = &report.summary.failures[0];
        assert_eq!(failure.name, "boom_003.pdf");
        assert!(
            failure.error.contains("internal error"),
            "unexpected failure message: {}",
            failure.error
        );
    }

    #[tokio::test]
    async fn turbo_panic_is_downgraded_to_a_failure() {
        let mut config = BatchConfig::default();
        config.turbo_threshold = 1;
        config.max_workers = 2;
        let engine = engine_with(Arc::new(VolatileText), config);
        let (sink, events) = collector();

        let documents: Vec<Document> = (0..8)
            .map(|i| if i == 3 { crashing_doc(i) } else { good_doc(i) })
            .collect();

        let report = assert_ok!(engine.run(documents, BatchOptions::default(), sink).await);

        assert_eq!(report.summary.total, 8);
        assert_eq!(report.summary.success_count, 7);
        assert_eq!(report.summary.failure_count, 1);
        let failure = &report.summary.failures[0];
        assert_eq!(failure.name, "boom_003.pdf");
        assert!(
            failure.error.contains("internal error"),
            "unexpected failure message: {}",
            failure.error
        );

        let events = events.lock().unwrap();
        let last = events.last().unwrap();
        assert_eq!(last.processed, 8);
        assert_eq!(last.successes + last.failures, last.processed);
    }

    #[tokio::test]
    async fn panicking_sink_does_not_abort_the_batch() {
        let engine = engine(BatchConfig::default());

        let events: Arc<Mutex<Vec<ProgressEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let sink_events = events.clone();
        let calls = Arc::new(AtomicUsize::new(0));
        let sink_calls = calls.clone();
        let sink: ProgressSink = Arc::new(move |event| {
            if sink_calls.fetch_add(1, Ordering::SeqCst) == 0 {
                panic!("sink rejected the event");
            }
            sink_events.lock().unwrap().push(event);
        });

        let report = assert_ok!(
            engine
                .run((0..8).map(good_doc).collect(), BatchOptions::default(), sink)
                .await
        );

        assert_eq!(report.summary.total, 8);
        assert_eq!(report.summary.success_count, 8);
        assert_eq!(calls.load(Ordering::SeqCst), 8, "each document is recorded once");

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 7, "only the panicked event is dropped");
        for event in events.iter() {
            assert!(event.processed <= event.total);
            assert_eq!(event.successes + event.failures, event.processed);
        }
        assert_eq!(events.last().unwrap().processed, 8);
    }

    #[tokio::test]
    async fn turbo_failures_are_isolated_like_bounded_ones() {
        let engine = engine(BatchConfig::default());
        let (sink, _) = collector();

        let documents: Vec<Document> = (0..150)
            .map(|i| if i < 10 { malformed_doc(i) } else { good_doc(i) })
            .collect();

        let report = engine
            .run(documents, BatchOptions::default(), sink)
            .await
            .unwrap();

        assert_eq!(report.summary.total, 150);
        assert_eq!(report.summary.success_count, 140);
        assert_eq!(report.summary.failure_count, 10);
    }

    #[tokio::test]
    async fn empty_batch_is_rejected_before_scheduling() {
        let engine = engine(BatchConfig::default());
        let (sink, events) = collector();

        let err = engine
            .run(Vec::new(), BatchOptions::default(), sink)
            .await
            .unwrap_err();

        assert!(matches!(err, crate::BatchError::EmptyBatch));
        assert!(events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn oversized_batch_is_rejected_before_scheduling() {
        let mut config = BatchConfig::default();
        config.max_documents = 5;
        let engine = engine(config);
        let (sink, events) = collector();

        let err = engine
            .run(
                (0..6).map(good_doc).collect(),
                BatchOptions::default(),
                sink,
            )
            .await
            .unwrap_err();

        match err {
            crate::BatchError::TooManyDocuments { count, limit } => {
                assert_eq!(count, 6);
                assert_eq!(limit, 5);
            }
            other => panic!("expected TooManyDocuments, got {:?}", other),
        }
        assert!(events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn requested_concurrency_is_clamped_to_the_configured_max() {
        let mut config = BatchConfig::default();
        config.max_concurrency = 3;
        config.default_concurrency = 2;
        let text = Arc::new(InstrumentedText::new(Duration::from_millis(10)));
        let engine = engine_with(text.clone(), config);
        let (sink, _) = collector();

        let options = BatchOptions {
            concurrency: Some(64),
            ..Default::default()
        };
        engine
            .run((0..12).map(good_doc).collect(), options, sink)
            .await
            .unwrap();

        assert!(text.peak() <= 3, "peak {} exceeded clamped cap", text.peak());
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let detector = FormatDetector::default();
        let registry = Arc::new(ExtractorRegistry::new());
        let processor = Arc::new(DocumentProcessor::new(
            detector,
            registry,
            Arc::new(InstrumentedText::new(Duration::ZERO)),
        ));

        let mut config = BatchConfig::default();
        config.max_workers = 0;
        assert!(matches!(
            BatchEngine::new(processor, config),
            Err(crate::BatchError::Config(_))
        ));
    }
}
