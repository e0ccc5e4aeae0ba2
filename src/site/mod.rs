//! Static site content shown next to the review feed.
//!
//! The service catalogue, portfolio categories, process steps and FAQ are
//! fixed copy. Contact channels are outbound links only; their targets can
//! be overridden through configuration.

use url::Url;

use crate::feed::FeedError;

/// Default enquiry e-mail address.
pub const DEFAULT_EMAIL: &str = "hello@yourdomain.com";

/// Default chat-app deep link for direct enquiries.
pub const DEFAULT_CHAT_URL: &str = "https://discord.com/users/000000000000000000";

/// Default community-server invite.
pub const DEFAULT_COMMUNITY_URL: &str = "https://discord.gg/yourserver";

/// Default phone number, in international format.
pub const DEFAULT_PHONE: &str = "+821012345678";

/// Portfolio categories in display order.
pub const PORTFOLIO_CATEGORIES: [&str; 5] = ["배너", "로고", "프로필", "포스터", "칭호"];

/// Extras included with every service offer.
pub const SERVICE_INCLUSIONS: [&str; 3] = [
    "기본 시안 1종 + 수정 2회",
    "원본/웹용 파일 제공",
    "급행 옵션 가능",
];

/// One entry of the service catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOffer {
    /// Service name.
    pub name: &'static str,
    /// Short description of the deliverable.
    pub description: &'static str,
    /// Starting price label.
    pub starting_price: &'static str,
}

/// One step of the commission process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStep {
    /// Step title.
    pub title: &'static str,
    /// What happens during the step.
    pub description: &'static str,
}

/// A frequently asked question with its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqEntry {
    /// Question.
    pub question: &'static str,
    /// Answer.
    pub answer: &'static str,
}

const SERVICES: [ServiceOffer; 3] = [
    ServiceOffer {
        name: "배너",
        description: "디스코드/유튜브 등 맞춤 사이즈",
        starting_price: "₩35,000~",
    },
    ServiceOffer {
        name: "로고",
        description: "워드마크 · 심볼마크",
        starting_price: "₩60,000~",
    },
    ServiceOffer {
        name: "프로필/칭호",
        description: "투명 PNG, GIF 옵션",
        starting_price: "₩25,000~",
    },
];

const PROCESS: [ProcessStep; 5] = [
    ProcessStep {
        title: "문의",
        description: "요청사항/참고자료 전달",
    },
    ProcessStep {
        title: "견적",
        description: "일정·금액 안내 및 확정",
    },
    ProcessStep {
        title: "시안",
        description: "1차 시안 공유",
    },
    ProcessStep {
        title: "피드백",
        description: "수정 반영 (2회)",
    },
    ProcessStep {
        title: "납품",
        description: "최종 파일 전달",
    },
];

const FAQ: [FaqEntry; 4] = [
    FaqEntry {
        question: "시안 수정은 몇 회까지 가능한가요?",
        answer: "기본 2회까지 무료이며, 이후 추가 수정은 별도 비용이 발생합니다.",
    },
    FaqEntry {
        question: "결제는 어떻게 하나요?",
        answer: "안전한 결제 가이드와 계좌/간편결제 옵션을 안내드립니다.",
    },
    FaqEntry {
        question: "원본 파일도 제공되나요?",
        answer: "납품 시 PNG/JPG와 함께 필요 시 원본(AI/PSD) 제공 가능합니다.",
    },
    FaqEntry {
        question: "상업적 사용이 가능한가요?",
        answer: "네. 계약 범위 내에서 상업적 사용을 허용합니다.",
    },
];

/// Returns the service catalogue in display order.
#[must_use]
pub const fn services() -> &'static [ServiceOffer] {
    &SERVICES
}

/// Returns the commission process steps in order.
#[must_use]
pub const fn process_steps() -> &'static [ProcessStep] {
    &PROCESS
}

/// Returns the portfolio categories.
#[must_use]
pub const fn categories() -> &'static [&'static str] {
    &PORTFOLIO_CATEGORIES
}

/// Returns the frequently asked questions.
#[must_use]
pub const fn faq() -> &'static [FaqEntry] {
    &FAQ
}

/// Kind of outbound contact channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// E-mail via a `mailto:` link.
    Email,
    /// Direct message in the chat app.
    Chat,
    /// Invite to the community server.
    Community,
    /// Phone call via a `tel:` link.
    Phone,
}

impl ChannelKind {
    /// Returns the label shown next to the link.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Email => "이메일 문의",
            Self::Chat => "디스코드 문의",
            Self::Community => "커뮤니티 서버",
            Self::Phone => "전화",
        }
    }
}

/// An outbound contact link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactChannel {
    /// Channel kind.
    pub kind: ChannelKind,
    /// Link target.
    pub link: Url,
}

/// Raw contact settings before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactLinks {
    /// Enquiry e-mail address (without `mailto:`).
    pub email: String,
    /// Chat-app deep link.
    pub chat_url: String,
    /// Community-server invite.
    pub community_url: String,
    /// Phone number (without `tel:`).
    pub phone: String,
}

impl Default for ContactLinks {
    fn default() -> Self {
        Self {
            email: DEFAULT_EMAIL.to_owned(),
            chat_url: DEFAULT_CHAT_URL.to_owned(),
            community_url: DEFAULT_COMMUNITY_URL.to_owned(),
            phone: DEFAULT_PHONE.to_owned(),
        }
    }
}

impl ContactLinks {
    /// Validates the links and returns them in display order.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidUrl`] when a link does not parse or the
    /// e-mail address or phone number is blank.
    pub fn channels(&self) -> Result<Vec<ContactChannel>, FeedError> {
        let email = required(&self.email, "e-mail address")?;
        let phone: String = required(&self.phone, "phone number")?
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        Ok(vec![
            ContactChannel {
                kind: ChannelKind::Email,
                link: parse_link(&format!("mailto:{email}"))?,
            },
            ContactChannel {
                kind: ChannelKind::Chat,
                link: parse_link(&self.chat_url)?,
            },
            ContactChannel {
                kind: ChannelKind::Community,
                link: parse_link(&self.community_url)?,
            },
            ContactChannel {
                kind: ChannelKind::Phone,
                link: parse_link(&format!("tel:{phone}"))?,
            },
        ])
    }
}

fn required<'a>(value: &'a str, what: &str) -> Result<&'a str, FeedError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FeedError::InvalidUrl(format!("contact {what} is empty")));
    }
    Ok(trimmed)
}

fn parse_link(raw: &str) -> Result<Url, FeedError> {
    Url::parse(raw.trim()).map_err(|error| FeedError::InvalidUrl(format!("{raw}: {error}")))
}
