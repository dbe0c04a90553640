use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::infrastructure::event_bus::EventBus;
use crate::modules::support::application::{ApplicationError, ChatReplyDto, CommandHandler};
use crate::modules::support::domain::{
    EscalationPolicy, EscalationTriggeredEvent, LanguageCode, Message, MoodLogEntry,
    MoodLogFailedEvent, RegionCode, Reply, ReplyProducedEvent, ResponseCatalog, SentimentLabel,
    SentimentResult, SupportEvent, TranscriptEntry, TranslationDegradedEvent, UserId,
};
use crate::modules::support::ports::{
    choose, MoodHistoryStore, RandomSource, ResponseGenerator, SentimentClassifier,
    TranscriptRepository, Translator,
};

/// 处理一条用户消息的命令
#[derive(Debug, Clone)]
pub struct ProcessMessageCommand {
    pub user: UserId,
    pub message: String,
    pub language: Option<String>,
    pub region: Option<String>,
}

impl ProcessMessageCommand {
    pub fn new(user: impl Into<UserId>, message: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            message: message.into(),
            language: None,
            region: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    fn into_message(self, default_language: &LanguageCode) -> Message {
        let language = self
            .language
            .map(LanguageCode::new)
            .unwrap_or_else(|| default_language.clone());
        let region = self.region.map(RegionCode::new);
        Message::new(self.user, self.message, language, region)
    }
}

/// 流水线开关
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// 分类器和生成器使用的语言
    pub default_language: LanguageCode,
    /// 消息未指定地区时使用
    pub default_region: RegionCode,
    pub escalation: EscalationPolicy,
    pub translation_enabled: bool,
    pub persistence_enabled: bool,
    /// 分类与生成并发执行
    pub overlap_providers: bool,
    /// 分类器或生成器失败时直接报错，而不是降级
    pub strict_providers: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            default_language: LanguageCode::default(),
            default_region: RegionCode::global(),
            escalation: EscalationPolicy::default(),
            translation_enabled: true,
            persistence_enabled: true,
            overlap_providers: true,
            strict_providers: false,
        }
    }
}

/// 对话流水线
///
/// 翻译入 -> 情绪分类 -> 生成回复（失败回退到目录）-> 危机升级 -> 翻译回 -> 记录情绪
pub struct ConversationPipeline {
    classifier: Arc<dyn SentimentClassifier>,
    generator: Arc<dyn ResponseGenerator>,
    translator: Option<Arc<dyn Translator>>,
    catalog: Arc<ResponseCatalog>,
    mood_store: Arc<dyn MoodHistoryStore>,
    transcript_store: Option<Arc<dyn TranscriptRepository>>,
    random: Arc<dyn RandomSource>,
    event_bus: Option<Arc<EventBus>>,
    options: PipelineOptions,
}

impl ConversationPipeline {
    pub fn new(
        classifier: Arc<dyn SentimentClassifier>,
        generator: Arc<dyn ResponseGenerator>,
        catalog: Arc<ResponseCatalog>,
        mood_store: Arc<dyn MoodHistoryStore>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            classifier,
            generator,
            translator: None,
            catalog,
            mood_store,
            transcript_store: None,
            random,
            event_bus: None,
            options: PipelineOptions::default(),
        }
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_transcript_store(mut self, store: Arc<dyn TranscriptRepository>) -> Self {
        self.transcript_store = Some(store);
        self
    }

    pub fn with_event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// 处理一条消息，返回最终回复
    ///
    /// 空消息和输入翻译失败是仅有的两个无副作用的错误出口
    pub async fn process(&self, message: Message) -> Result<Reply, ApplicationError> {
        if message.is_blank() {
            return Err(ApplicationError::EmptyInput);
        }

        tracing::info!(
            "[Pipeline] Processing message from {} (lang={}, region={})",
            message.author(),
            message.language(),
            message.region_or(&self.options.default_region)
        );

        let normalized = self.normalize_input(&message).await?;

        let (classified, generated) = if self.options.overlap_providers {
            futures::join!(self.classify(&normalized), self.generate(&normalized))
        } else {
            let classified = self.classify(&normalized).await;
            let generated = self.generate(&normalized).await;
            (classified, generated)
        };
        let sentiment = classified?;
        let generated = generated?;

        let used_fallback = generated.is_none();
        let text = match generated {
            Some(text) => text,
            None => self.fallback_reply(sentiment.label())?,
        };

        let mut reply = Reply::new(text, sentiment);
        self.escalate(&message, &mut reply);
        self.restore_language(&message, &mut reply).await;
        self.persist(&message, &reply).await;

        self.publish(SupportEvent::ReplyProduced(ReplyProducedEvent {
            user: message.author().clone(),
            sentiment: sentiment.label(),
            confidence: sentiment.confidence(),
            used_fallback,
            timestamp: Utc::now(),
        }));

        Ok(reply)
    }

    fn needs_translation(&self, language: &LanguageCode) -> bool {
        self.options.translation_enabled
            && self.translator.is_some()
            && *language != self.options.default_language
    }

    async fn normalize_input(&self, message: &Message) -> Result<String, ApplicationError> {
        let translator = match &self.translator {
            Some(translator) if self.needs_translation(message.language()) => translator,
            _ => return Ok(message.text().to_string()),
        };

        let translated = translator
            .translate(message.text(), &self.options.default_language)
            .await
            .map_err(|e| {
                tracing::error!(
                    "[Pipeline] Input translation via {} failed: {}",
                    translator.name(),
                    e
                );
                ApplicationError::Translation(e)
            })?;

        tracing::debug!(
            "[Pipeline] Translated input {} -> {}",
            message.language(),
            self.options.default_language
        );
        Ok(translated)
    }

    async fn classify(&self, text: &str) -> Result<SentimentResult, ApplicationError> {
        match self.classifier.classify(text).await {
            Ok(result) => {
                tracing::debug!(
                    "[Pipeline] {} classified as {} ({:.2})",
                    self.classifier.name(),
                    result.label(),
                    result.confidence()
                );
                Ok(result)
            }
            Err(e) if self.options.strict_providers => Err(ApplicationError::Provider(e)),
            Err(e) => {
                tracing::warn!(
                    "[Pipeline] Classifier {} failed, treating as neutral: {}",
                    self.classifier.name(),
                    e
                );
                Ok(SentimentResult::undecided())
            }
        }
    }

    /// 返回 None 表示需要回退到目录
    async fn generate(&self, text: &str) -> Result<Option<String>, ApplicationError> {
        match self.generator.generate(text).await {
            Ok(output) if output.trim().is_empty() => {
                tracing::debug!(
                    "[Pipeline] Generator {} returned nothing, using catalog",
                    self.generator.name()
                );
                Ok(None)
            }
            Ok(output) => Ok(Some(output.trim().to_string())),
            Err(e) if self.options.strict_providers => Err(ApplicationError::Provider(e)),
            Err(e) => {
                tracing::warn!(
                    "[Pipeline] Generator {} failed, using catalog: {}",
                    self.generator.name(),
                    e
                );
                Ok(None)
            }
        }
    }

    fn fallback_reply(&self, label: SentimentLabel) -> Result<String, ApplicationError> {
        choose(self.random.as_ref(), self.catalog.replies_for(label))
            .cloned()
            .ok_or_else(|| {
                ApplicationError::Internal(format!("No catalog reply for sentiment {}", label))
            })
    }

    fn escalate(&self, message: &Message, reply: &mut Reply) {
        let sentiment = reply.sentiment();
        if !self.options.escalation.should_escalate(&sentiment) {
            return;
        }

        let region = message.region_or(&self.options.default_region);
        let candidates = self.catalog.resources_for(&region);
        let resource = match choose(self.random.as_ref(), &candidates) {
            Some(resource) => (*resource).clone(),
            None => {
                tracing::warn!("[Pipeline] No crisis resource available for region {}", region);
                return;
            }
        };

        tracing::info!(
            "[Pipeline] Escalating {} to {} ({:.2})",
            message.author(),
            resource.name,
            sentiment.confidence()
        );

        let resource_name = resource.name.clone();
        reply.escalate(resource);

        self.publish(SupportEvent::EscalationTriggered(EscalationTriggeredEvent {
            user: message.author().clone(),
            region,
            resource_name,
            confidence: sentiment.confidence(),
            timestamp: Utc::now(),
        }));
    }

    /// 翻译失败时保留默认语言的回复
    async fn restore_language(&self, message: &Message, reply: &mut Reply) {
        let translator = match &self.translator {
            Some(translator) if self.needs_translation(message.language()) => translator,
            _ => return,
        };

        match translator.translate(reply.text(), message.language()).await {
            Ok(text) if !text.trim().is_empty() => reply.set_text(text),
            Ok(_) => {
                tracing::warn!("[Pipeline] Reverse translation returned empty text");
            }
            Err(e) => {
                tracing::warn!(
                    "[Pipeline] Reverse translation to {} failed: {}",
                    message.language(),
                    e
                );
                self.publish(SupportEvent::TranslationDegraded(TranslationDegradedEvent {
                    user: message.author().clone(),
                    language: message.language().clone(),
                    error: e.to_string(),
                    timestamp: Utc::now(),
                }));
            }
        }
    }

    /// 在独立任务中写入情绪日志和对话记录
    ///
    /// 调用方放弃等待时写入依然完成；写入失败不影响回复
    async fn persist(&self, message: &Message, reply: &Reply) {
        if !self.options.persistence_enabled {
            return;
        }

        let entry = MoodLogEntry::record(message.author().clone(), reply.sentiment());
        let transcript = self
            .transcript_store
            .clone()
            .map(|store| (store, TranscriptEntry::new(message.author().clone(), message.text(), reply)));
        let mood_store = self.mood_store.clone();

        let task = tokio::spawn(async move {
            let mood_result = mood_store.append(entry).await;
            if let Some((store, record)) = transcript {
                if let Err(e) = store.append(record).await {
                    tracing::warn!("[Pipeline] Failed to append transcript: {}", e);
                }
            }
            mood_result
        });

        let failure = match task.await {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(e.to_string()),
            Err(e) => Some(format!("persistence task aborted: {}", e)),
        };

        if let Some(error) = failure {
            tracing::warn!(
                "[Pipeline] Failed to log mood for {}: {}",
                message.author(),
                error
            );
            self.publish(SupportEvent::MoodLogFailed(MoodLogFailedEvent {
                user: message.author().clone(),
                error,
                timestamp: Utc::now(),
            }));
        }
    }

    fn publish(&self, event: SupportEvent) {
        if let Some(bus) = &self.event_bus {
            bus.publish(event);
        }
    }
}

#[async_trait]
impl CommandHandler<ProcessMessageCommand, ChatReplyDto> for ConversationPipeline {
    async fn handle(&self, command: ProcessMessageCommand) -> Result<ChatReplyDto, ApplicationError> {
        let reply = self
            .process(command.into_message(&self.options.default_language))
            .await?;
        Ok(ChatReplyDto::from(&reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::support::domain::CatalogConfig;
    use crate::modules::support::infrastructure::{
        InMemoryMoodRepository, InMemoryTranscriptRepository, SeededRandom,
    };
    use crate::modules::support::ports::{
        ProviderError, RepositoryError, TranslationError,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedClassifier {
        result: Option<SentimentResult>,
        calls: AtomicUsize,
    }

    impl FixedClassifier {
        fn returning(label: SentimentLabel, confidence: f32) -> Self {
            Self {
                result: Some(SentimentResult::new(label, confidence)),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                result: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SentimentClassifier for FixedClassifier {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn classify(&self, _text: &str) -> Result<SentimentResult, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .ok_or_else(|| ProviderError::ProviderNotAvailable("fixed".to_string()))
        }
    }

    struct FixedGenerator {
        output: Result<String, ()>,
        calls: AtomicUsize,
    }

    impl FixedGenerator {
        fn returning(text: &str) -> Self {
            Self {
                output: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                output: Err(()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ResponseGenerator for FixedGenerator {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn generate(&self, _text: &str) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.output
                .clone()
                .map_err(|_| ProviderError::Timeout(30))
        }
    }

    /// 给文本加上目标语言前缀；可配置入站或出站失败
    struct TaggingTranslator {
        fail_to_default: bool,
        fail_to_user: bool,
    }

    #[async_trait]
    impl Translator for TaggingTranslator {
        fn name(&self) -> &str {
            "tagging"
        }

        async fn translate(&self, text: &str, to: &LanguageCode) -> Result<String, TranslationError> {
            let failing = if to.code() == "en" {
                self.fail_to_default
            } else {
                self.fail_to_user
            };
            if failing {
                return Err(TranslationError::NetworkError("unreachable".to_string()));
            }
            Ok(format!("[{}] {}", to, text))
        }
    }

    struct BrokenMoodStore;

    #[async_trait]
    impl MoodHistoryStore for BrokenMoodStore {
        async fn append(&self, _entry: MoodLogEntry) -> Result<(), RepositoryError> {
            Err(RepositoryError::DatabaseError("disk full".to_string()))
        }

        async fn recent_for(
            &self,
            _user: &UserId,
            _limit: usize,
        ) -> Result<Vec<MoodLogEntry>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn count_for(&self, _user: &UserId) -> Result<usize, RepositoryError> {
            Ok(0)
        }
    }

    fn pipeline(
        classifier: Arc<FixedClassifier>,
        generator: Arc<FixedGenerator>,
        store: Arc<dyn MoodHistoryStore>,
    ) -> ConversationPipeline {
        ConversationPipeline::new(
            classifier,
            generator,
            Arc::new(ResponseCatalog::default()),
            store,
            Arc::new(SeededRandom::new(7)),
        )
    }

    fn message(user: &str, text: &str) -> Message {
        Message::new(UserId::from(user), text, LanguageCode::default(), None)
    }

    #[tokio::test]
    async fn test_positive_message_logs_entry() {
        let store = Arc::new(InMemoryMoodRepository::new());
        let pipeline = pipeline(
            Arc::new(FixedClassifier::returning(SentimentLabel::Positive, 0.92)),
            Arc::new(FixedGenerator::returning("Glad to hear it!")),
            store.clone(),
        );

        let reply = pipeline
            .process(message("alice", "I'm feeling great today!"))
            .await
            .unwrap();

        assert_eq!(reply.text(), "Glad to hear it!");
        assert_eq!(reply.sentiment().label(), SentimentLabel::Positive);
        assert!(reply.escalation().is_none());

        let entries = store.recent_for(&UserId::from("alice"), 10).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].sentiment(), SentimentLabel::Positive);
        assert!((entries[0].confidence() - 0.92).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_confident_negative_escalates_with_regional_resource() {
        let store = Arc::new(InMemoryMoodRepository::new());
        let catalog = Arc::new(ResponseCatalog::default());
        let pipeline = ConversationPipeline::new(
            Arc::new(FixedClassifier::returning(SentimentLabel::Negative, 0.85)),
            Arc::new(FixedGenerator::returning("I'm sorry it's been hard.")),
            catalog.clone(),
            store.clone(),
            Arc::new(SeededRandom::new(3)),
        );

        let msg = Message::new(
            UserId::from("bob"),
            "I feel hopeless",
            LanguageCode::default(),
            Some(RegionCode::new("US")),
        );
        let reply = pipeline.process(msg).await.unwrap();

        let resource = reply.escalation().expect("should escalate");
        assert!(resource.is_available_in(&RegionCode::new("US")));
        assert!(reply.text().starts_with("I'm sorry it's been hard."));
        assert!(reply.text().ends_with(&format!("[{}]({})", resource.name, resource.url)));
        assert!(catalog
            .resources_for(&RegionCode::new("US"))
            .iter()
            .any(|r| r.name == resource.name));

        let entries = store.recent_for(&UserId::from("bob"), 10).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].sentiment(), SentimentLabel::Negative);
    }

    #[tokio::test]
    async fn test_threshold_is_exclusive() {
        let pipeline = pipeline(
            Arc::new(FixedClassifier::returning(SentimentLabel::Negative, 0.7)),
            Arc::new(FixedGenerator::returning("That sounds hard.")),
            Arc::new(InMemoryMoodRepository::new()),
        );

        let reply = pipeline.process(message("carol", "meh, rough day")).await.unwrap();

        assert!(reply.escalation().is_none());
        assert_eq!(reply.text(), "That sounds hard.");
    }

    #[tokio::test]
    async fn test_no_resource_in_region_skips_escalation() {
        let mut config = CatalogConfig::default();
        config.resources.retain(|r| !r.region.is_global());
        let catalog = ResponseCatalog::from_config(config).unwrap();

        let pipeline = ConversationPipeline::new(
            Arc::new(FixedClassifier::returning(SentimentLabel::Negative, 0.95)),
            Arc::new(FixedGenerator::returning("I'm here.")),
            Arc::new(catalog),
            Arc::new(InMemoryMoodRepository::new()),
            Arc::new(SeededRandom::new(1)),
        );

        let msg = Message::new(
            UserId::from("dan"),
            "everything is awful",
            LanguageCode::default(),
            Some(RegionCode::new("JP")),
        );
        let reply = pipeline.process(msg).await.unwrap();

        assert!(reply.escalation().is_none());
        assert_eq!(reply.text(), "I'm here.");
    }

    #[tokio::test]
    async fn test_empty_generation_falls_back_to_catalog() {
        let pipeline = pipeline(
            Arc::new(FixedClassifier::returning(SentimentLabel::Neutral, 0.4)),
            Arc::new(FixedGenerator::returning("   ")),
            Arc::new(InMemoryMoodRepository::new()),
        );

        let reply = pipeline.process(message("erin", "ok")).await.unwrap();

        let catalog = ResponseCatalog::default();
        assert!(catalog
            .replies_for(SentimentLabel::Neutral)
            .iter()
            .any(|r| r == reply.text()));
    }

    #[tokio::test]
    async fn test_generator_failure_falls_back_to_catalog() {
        let pipeline = pipeline(
            Arc::new(FixedClassifier::returning(SentimentLabel::Negative, 0.5)),
            Arc::new(FixedGenerator::failing()),
            Arc::new(InMemoryMoodRepository::new()),
        );

        let reply = pipeline.process(message("fay", "not great")).await.unwrap();

        let catalog = ResponseCatalog::default();
        assert!(catalog
            .replies_for(SentimentLabel::Negative)
            .iter()
            .any(|r| r == reply.text()));
        assert!(reply.escalation().is_none());
    }

    #[tokio::test]
    async fn test_classifier_failure_is_neutral() {
        let store = Arc::new(InMemoryMoodRepository::new());
        let pipeline = pipeline(
            Arc::new(FixedClassifier::failing()),
            Arc::new(FixedGenerator::returning("Tell me more.")),
            store.clone(),
        );

        let reply = pipeline.process(message("gus", "hmm")).await.unwrap();

        assert_eq!(reply.sentiment().label(), SentimentLabel::Neutral);
        assert_eq!(reply.sentiment().confidence(), 0.0);

        let entries = store.recent_for(&UserId::from("gus"), 10).await.unwrap();
        assert_eq!(entries[0].sentiment(), SentimentLabel::Neutral);
    }

    #[tokio::test]
    async fn test_strict_mode_surfaces_provider_error() {
        let store = Arc::new(InMemoryMoodRepository::new());
        let pipeline = pipeline(
            Arc::new(FixedClassifier::failing()),
            Arc::new(FixedGenerator::returning("Tell me more.")),
            store.clone(),
        )
        .with_options(PipelineOptions {
            strict_providers: true,
            ..PipelineOptions::default()
        });

        let result = pipeline.process(message("hal", "hmm")).await;

        assert!(matches!(result, Err(ApplicationError::Provider(_))));
        assert_eq!(store.count_for(&UserId::from("hal")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_input_has_no_side_effects() {
        let store = Arc::new(InMemoryMoodRepository::new());
        let classifier = Arc::new(FixedClassifier::returning(SentimentLabel::Positive, 0.9));
        let generator = Arc::new(FixedGenerator::returning("hi"));
        let pipeline = pipeline(classifier.clone(), generator.clone(), store.clone());

        let result = pipeline.process(message("ivy", "   ")).await;

        let err = result.unwrap_err();
        assert!(matches!(err, ApplicationError::EmptyInput));
        assert_eq!(err.to_string(), "Please type something!");
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.count_for(&UserId::from("ivy")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_inbound_translation_failure_aborts() {
        let store = Arc::new(InMemoryMoodRepository::new());
        let classifier = Arc::new(FixedClassifier::returning(SentimentLabel::Positive, 0.9));
        let pipeline = pipeline(
            classifier.clone(),
            Arc::new(FixedGenerator::returning("hi")),
            store.clone(),
        )
        .with_translator(Arc::new(TaggingTranslator {
            fail_to_default: true,
            fail_to_user: false,
        }));

        let msg = Message::new(UserId::from("jo"), "Bonjour", LanguageCode::new("fr"), None);
        let result = pipeline.process(msg).await;

        assert!(matches!(result, Err(ApplicationError::Translation(_))));
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.count_for(&UserId::from("jo")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reply_is_translated_back() {
        let pipeline = pipeline(
            Arc::new(FixedClassifier::returning(SentimentLabel::Positive, 0.9)),
            Arc::new(FixedGenerator::returning("Great!")),
            Arc::new(InMemoryMoodRepository::new()),
        )
        .with_translator(Arc::new(TaggingTranslator {
            fail_to_default: false,
            fail_to_user: false,
        }));

        let msg = Message::new(UserId::from("kim"), "Je vais bien", LanguageCode::new("fr"), None);
        let reply = pipeline.process(msg).await.unwrap();

        assert_eq!(reply.text(), "[fr] Great!");
    }

    #[tokio::test]
    async fn test_default_language_skips_translator() {
        let pipeline = pipeline(
            Arc::new(FixedClassifier::returning(SentimentLabel::Positive, 0.9)),
            Arc::new(FixedGenerator::returning("Great!")),
            Arc::new(InMemoryMoodRepository::new()),
        )
        .with_translator(Arc::new(TaggingTranslator {
            fail_to_default: true,
            fail_to_user: true,
        }));

        let reply = pipeline.process(message("lee", "good day")).await.unwrap();

        assert_eq!(reply.text(), "Great!");
    }

    #[tokio::test]
    async fn test_reverse_translation_failure_keeps_default_language() {
        let bus = Arc::new(EventBus::new());
        let mut events = bus.subscribe();
        let store = Arc::new(InMemoryMoodRepository::new());
        let pipeline = pipeline(
            Arc::new(FixedClassifier::returning(SentimentLabel::Positive, 0.9)),
            Arc::new(FixedGenerator::returning("Great!")),
            store.clone(),
        )
        .with_translator(Arc::new(TaggingTranslator {
            fail_to_default: false,
            fail_to_user: true,
        }))
        .with_event_bus(bus);

        let msg = Message::new(UserId::from("max"), "Ça va", LanguageCode::new("fr"), None);
        let reply = pipeline.process(msg).await.unwrap();

        assert_eq!(reply.text(), "Great!");
        assert_eq!(store.count_for(&UserId::from("max")).await.unwrap(), 1);

        let event = events.recv().await.unwrap();
        assert_eq!(event.event_type(), "translation.degraded");
    }

    #[tokio::test]
    async fn test_persistence_failure_still_returns_reply() {
        let bus = Arc::new(EventBus::new());
        let mut events = bus.subscribe();
        let pipeline = pipeline(
            Arc::new(FixedClassifier::returning(SentimentLabel::Positive, 0.9)),
            Arc::new(FixedGenerator::returning("Nice!")),
            Arc::new(BrokenMoodStore),
        )
        .with_event_bus(bus);

        let reply = pipeline.process(message("ned", "good news")).await.unwrap();

        assert_eq!(reply.text(), "Nice!");
        let event = events.recv().await.unwrap();
        assert_eq!(event.event_type(), "mood_log.failed");
    }

    #[tokio::test]
    async fn test_history_is_newest_first() {
        let store = Arc::new(InMemoryMoodRepository::new());
        let user = UserId::from("olive");
        let confidences = [0.2_f32, 0.5, 0.9];

        for confidence in confidences {
            pipeline(
                Arc::new(FixedClassifier::returning(SentimentLabel::Neutral, confidence)),
                Arc::new(FixedGenerator::returning("Okay.")),
                store.clone(),
            )
            .process(message("olive", &format!("feeling {}", confidence)))
            .await
            .unwrap();
        }

        // 空消息不写日志
        let result = pipeline(
            Arc::new(FixedClassifier::returning(SentimentLabel::Neutral, 0.4)),
            Arc::new(FixedGenerator::returning("Okay.")),
            store.clone(),
        )
        .process(message("olive", ""))
        .await;
        assert!(matches!(result, Err(ApplicationError::EmptyInput)));
        assert_eq!(store.count_for(&user).await.unwrap(), 3);

        let entries = store.recent_for(&user, 3).await.unwrap();
        let seen: Vec<f32> = entries.iter().map(|e| e.confidence()).collect();
        assert_eq!(seen.len(), 3);
        for (got, expected) in seen.iter().zip(confidences.iter().rev()) {
            assert!((got - expected).abs() < 1e-6, "got {:?}", seen);
        }
    }

    #[tokio::test]
    async fn test_transcript_is_recorded() {
        let transcripts = Arc::new(InMemoryTranscriptRepository::new());
        let pipeline = pipeline(
            Arc::new(FixedClassifier::returning(SentimentLabel::Positive, 0.8)),
            Arc::new(FixedGenerator::returning("Yay!")),
            Arc::new(InMemoryMoodRepository::new()),
        )
        .with_transcript_store(transcripts.clone());

        pipeline.process(message("pat", "I passed")).await.unwrap();

        let records = transcripts.recent_for(&UserId::from("pat"), 5).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "I passed");
        assert_eq!(records[0].response, "Yay!");
    }

    #[tokio::test]
    async fn test_persistence_disabled_writes_nothing() {
        let store = Arc::new(InMemoryMoodRepository::new());
        let pipeline = pipeline(
            Arc::new(FixedClassifier::returning(SentimentLabel::Positive, 0.8)),
            Arc::new(FixedGenerator::returning("Yay!")),
            store.clone(),
        )
        .with_options(PipelineOptions {
            persistence_enabled: false,
            ..PipelineOptions::default()
        });

        pipeline.process(message("quinn", "hello")).await.unwrap();

        assert_eq!(store.count_for(&UserId::from("quinn")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_command_handler_returns_dto() {
        let pipeline = pipeline(
            Arc::new(FixedClassifier::returning(SentimentLabel::Positive, 0.876)),
            Arc::new(FixedGenerator::returning("Wonderful!")),
            Arc::new(InMemoryMoodRepository::new()),
        );

        let dto = pipeline
            .handle(ProcessMessageCommand::new("rae", "all good").with_region("US"))
            .await
            .unwrap();

        assert_eq!(dto.response, "Wonderful!");
        assert_eq!(dto.sentiment, "positive");
        assert!((dto.confidence - 0.88).abs() < 1e-6);
    }
}
