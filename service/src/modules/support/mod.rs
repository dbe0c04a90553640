// Support Module - 情绪支持对话模块
//
// 实现六边形架构（Hexagonal Architecture）：
// - domain: 领域层，包含实体、值对象、领域服务和领域事件
// - ports: 端口层，定义情绪分类、回复生成、翻译和存储的抽象接口
// - infrastructure: 基础设施层，实现端口的具体适配器
// - application: 应用层，实现对话流水线和查询处理器

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// 重新导出常用类型
pub use application::{
    ApplicationError, ChatReplyDto, ChatRequest, CommandHandler, ConversationPipeline,
    MoodTrendHandler, MoodTrendPoint, MoodTrendQuery, PipelineOptions, ProcessMessageCommand,
    QueryHandler, RecentTranscriptHandler, RecentTranscriptQuery, TranscriptDto,
};

pub use domain::{
    CatalogConfig, EscalationPolicy, LanguageCode, Message, MoodLogEntry, RegionCode, Reply,
    Resource, ResponseCatalog, SentimentLabel, SentimentResult, SupportEvent, UserId,
};

pub use infrastructure::{
    CatalogOnlyGenerator, FileMoodRepository, FileTranscriptRepository, HttpSentimentClassifier,
    HttpTranslator, InMemoryMoodRepository, InMemoryTranscriptRepository,
    KeywordSentimentClassifier, OpenAiResponseGenerator, SeededRandom, ThreadRandom,
};

pub use ports::{
    MoodHistoryStore, ProviderEndpoint, ProviderError, RandomSource, RepositoryError,
    ResponseGenerator, SentimentClassifier, TranscriptRepository, TranslationError, Translator,
};

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::infrastructure::event_bus::EventBus;
use crate::modules::config::AppConfig;
use crate::shared::AppResult;

/// 组装 SupportModule 所需的全部依赖
pub struct SupportComponents {
    pub classifier: Arc<dyn SentimentClassifier>,
    pub generator: Arc<dyn ResponseGenerator>,
    pub translator: Option<Arc<dyn Translator>>,
    pub catalog: ResponseCatalog,
    pub mood_store: Arc<dyn MoodHistoryStore>,
    pub transcript_store: Option<Arc<dyn TranscriptRepository>>,
    pub random: Arc<dyn RandomSource>,
    pub options: PipelineOptions,
    pub trend_limit: usize,
}

impl SupportComponents {
    /// 内存存储 + 默认目录
    pub fn in_memory(
        classifier: Arc<dyn SentimentClassifier>,
        generator: Arc<dyn ResponseGenerator>,
    ) -> Self {
        Self {
            classifier,
            generator,
            translator: None,
            catalog: ResponseCatalog::default(),
            mood_store: Arc::new(InMemoryMoodRepository::new()),
            transcript_store: Some(Arc::new(InMemoryTranscriptRepository::new())),
            random: Arc::new(ThreadRandom),
            options: PipelineOptions::default(),
            trend_limit: application::DEFAULT_TREND_LIMIT,
        }
    }
}

/// Support 模块容器
///
/// 管理模块内的依赖注入
pub struct SupportModule {
    pipeline: ConversationPipeline,
    event_bus: Arc<EventBus>,
    mood_trend_handler: MoodTrendHandler,
    transcript_handler: Option<RecentTranscriptHandler>,
}

impl SupportModule {
    /// 创建使用内存存储的实例（用于开发测试）
    pub fn new(
        classifier: Arc<dyn SentimentClassifier>,
        generator: Arc<dyn ResponseGenerator>,
    ) -> Self {
        Self::with_components(SupportComponents::in_memory(classifier, generator))
    }

    /// 创建带文件持久化的实例
    ///
    /// # Errors
    /// 如果无法初始化文件存储，返回错误
    pub async fn new_with_persistence(
        data_dir: PathBuf,
        classifier: Arc<dyn SentimentClassifier>,
        generator: Arc<dyn ResponseGenerator>,
    ) -> Result<Self, RepositoryError> {
        let mut components = SupportComponents::in_memory(classifier, generator);
        components.mood_store = Arc::new(FileMoodRepository::new(data_dir.clone()).await?);
        components.transcript_store = Some(Arc::new(FileTranscriptRepository::new(data_dir).await?));

        Ok(Self::with_components(components))
    }

    /// 按配置创建实例
    ///
    /// 未配置的远程提供方使用本地实现：关键词分类器、纯目录回复、不翻译
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        let providers = &config.providers;

        let classifier: Arc<dyn SentimentClassifier> = match &providers.classifier {
            Some(endpoint) => Arc::new(HttpSentimentClassifier::new(endpoint.clone())?),
            None => Arc::new(KeywordSentimentClassifier::new()),
        };
        let generator: Arc<dyn ResponseGenerator> = match &providers.generator {
            Some(endpoint) => Arc::new(OpenAiResponseGenerator::new(endpoint.clone())?),
            None => Arc::new(CatalogOnlyGenerator::new()),
        };
        let translator: Option<Arc<dyn Translator>> = match &providers.translator {
            Some(endpoint) => Some(Arc::new(HttpTranslator::new(endpoint.clone())?)),
            None => None,
        };

        let catalog = match &config.catalog {
            Some(catalog) => ResponseCatalog::from_config(catalog.clone())?,
            None => ResponseCatalog::default(),
        };

        let pipeline = &config.pipeline;
        let (mood_store, transcript_store): (
            Arc<dyn MoodHistoryStore>,
            Option<Arc<dyn TranscriptRepository>>,
        ) = if pipeline.persistence_enabled {
            let data_dir = config.general.data_dir.clone();
            (
                Arc::new(FileMoodRepository::new(data_dir.clone()).await?),
                Some(Arc::new(FileTranscriptRepository::new(data_dir).await?)),
            )
        } else {
            (Arc::new(InMemoryMoodRepository::new()), None)
        };

        tracing::info!(
            "[Support] classifier={}, generator={}, translator={}",
            classifier.name(),
            generator.name(),
            translator.as_ref().map(|t| t.name()).unwrap_or("none")
        );

        Ok(Self::with_components(SupportComponents {
            classifier,
            generator,
            translator,
            catalog,
            mood_store,
            transcript_store,
            random: Arc::new(ThreadRandom),
            options: PipelineOptions {
                default_language: LanguageCode::new(config.general.default_language.as_str()),
                default_region: RegionCode::new(config.general.default_region.as_str()),
                escalation: EscalationPolicy::new(pipeline.escalation_threshold),
                translation_enabled: pipeline.translation_enabled,
                persistence_enabled: pipeline.persistence_enabled,
                overlap_providers: pipeline.overlap_providers,
                strict_providers: pipeline.strict_providers,
            },
            trend_limit: pipeline.trend_limit,
        }))
    }

    /// 使用自定义依赖创建
    pub fn with_components(components: SupportComponents) -> Self {
        let event_bus = Arc::new(EventBus::new());

        let mut pipeline = ConversationPipeline::new(
            components.classifier,
            components.generator,
            Arc::new(components.catalog),
            components.mood_store.clone(),
            components.random,
        )
        .with_options(components.options)
        .with_event_bus(event_bus.clone());

        if let Some(translator) = components.translator {
            pipeline = pipeline.with_translator(translator);
        }

        let transcript_handler = match components.transcript_store {
            Some(store) => {
                pipeline = pipeline.with_transcript_store(store.clone());
                Some(RecentTranscriptHandler::new(store))
            }
            None => None,
        };

        let mood_trend_handler =
            MoodTrendHandler::new(components.mood_store).with_max_limit(components.trend_limit);

        Self {
            pipeline,
            event_bus,
            mood_trend_handler,
            transcript_handler,
        }
    }

    /// 获取对话流水线
    pub fn pipeline(&self) -> &ConversationPipeline {
        &self.pipeline
    }

    /// 订阅模块事件
    pub fn subscribe(&self) -> broadcast::Receiver<SupportEvent> {
        self.event_bus.subscribe()
    }

    /// 处理一条消息
    pub async fn process_message(
        &self,
        command: ProcessMessageCommand,
    ) -> Result<ChatReplyDto, ApplicationError> {
        self.pipeline.handle(command).await
    }

    /// 查询情绪趋势（最新在前）
    pub async fn mood_trend(
        &self,
        user: impl Into<UserId>,
        limit: Option<usize>,
    ) -> Result<Vec<MoodTrendPoint>, ApplicationError> {
        self.mood_trend_handler
            .handle(MoodTrendQuery {
                user: user.into(),
                limit,
            })
            .await
    }

    /// 查询最近的对话记录，未启用记录时为空
    pub async fn recent_transcript(
        &self,
        user: impl Into<UserId>,
        limit: usize,
    ) -> Result<Vec<TranscriptDto>, ApplicationError> {
        match &self.transcript_handler {
            Some(handler) => {
                handler
                    .handle(RecentTranscriptQuery {
                        user: user.into(),
                        limit,
                    })
                    .await
            }
            None => Ok(Vec::new()),
        }
    }
}
