use serde::{Deserialize, Serialize};

/// Registration wizard step.
///
/// 注册向导步骤。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Choose investor or business.
    ///
    /// 选择角色。
    RoleSelect,
    /// Name, contact and country.
    ///
    /// 个人信息。
    PersonalInfo,
    /// Company details. Skipped for investors.
    ///
    /// 企业信息（投资者跳过）。
    BusinessInfo,
    /// Identity and business documents.
    ///
    /// 文件上传。
    DocumentUpload,
    /// Registration accepted by the identity service.
    ///
    /// 注册完成。
    Complete,
}

impl WizardStep {
    pub fn is_terminal(self) -> bool {
        matches!(self, WizardStep::Complete)
    }
}
